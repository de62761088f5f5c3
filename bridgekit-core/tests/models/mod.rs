#![allow(dead_code)]

use bridgekit_core::{
    projections,
    relation::{
        Children, Entity, OptionalChild, OptionalParent, Parent, ParentReference,
        skip_on_write_back,
    },
};
use serde::{Deserialize, Serialize, Serializer, ser::Error as _};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<i64>,
    pub name: String,
    pub mentor: OptionalParent<Person>,
}

impl Entity for Person {
    type Id = i64;

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }
}

projections! {
    pub trait PersonFields for Person {
        name: String,
        mentor: OptionalParent<Person>,
    }
}

pub fn person(id: i64, name: &str) -> Person {
    Person {
        id: Some(id),
        name: name.to_string(),
        mentor: OptionalParent::none(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<i64>,
    pub name: String,
    pub owner: Parent<Person>,
    pub sitter: OptionalParent<Person>,
}

impl Entity for Pet {
    type Id = i64;

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "skip_on_write_back")]
    pub members: Children<Person>,
    #[serde(skip_serializing_if = "skip_on_write_back")]
    pub mascot: OptionalChild<Pet>,
}

impl Entity for Team {
    type Id = i64;

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<i64>,
    pub title: String,
    pub person: ParentReference<Person>,
}

/// A record whose encoding always fails.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Unencodable {
    pub id: Option<i64>,
}

impl Serialize for Unencodable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("this record cannot be encoded"))
    }
}

impl Entity for Unencodable {
    type Id = i64;

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }
}
