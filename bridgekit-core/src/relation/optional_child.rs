//! # Optional Child
//!
//! The reference generated for server properties declared with `@OptionalChild`. It
//! decodes like [`OptionalParent`], but the persistence layer never reads it back, so it
//! is left out of write-back output.
use super::{Entity, FromMissingKey, OptionalParent, SkipOnWriteBack};
use crate::error::{DecodeError, RelationError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

/// An optional reference owned by the other side of the relationship.
#[derive(Debug, Clone)]
pub struct OptionalChild<T: Entity>(OptionalParent<T>);

impl<T: Entity> OptionalChild<T> {
    pub fn new(id: Option<T::Id>) -> Self {
        Self(OptionalParent::new(id))
    }

    pub fn none() -> Self {
        Self(OptionalParent::none())
    }

    /// Fails with [`RelationError::Unidentified`] when the record has no identifier.
    pub fn from_value(value: T) -> Result<Self, RelationError> {
        OptionalParent::from_value(value).map(Self)
    }

    pub fn into_inner(self) -> OptionalParent<T> {
        self.0
    }
}

impl<T: Entity> Default for OptionalChild<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Entity> Deref for OptionalChild<T> {
    type Target = OptionalParent<T>;

    fn deref(&self) -> &OptionalParent<T> {
        &self.0
    }
}

impl<T: Entity> DerefMut for OptionalChild<T> {
    fn deref_mut(&mut self) -> &mut OptionalParent<T> {
        &mut self.0
    }
}

impl<T: Entity> From<OptionalParent<T>> for OptionalChild<T> {
    fn from(parent: OptionalParent<T>) -> Self {
        Self(parent)
    }
}

impl<T: Entity> PartialEq for OptionalChild<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Entity> Eq for OptionalChild<T> where T::Id: Eq {}

impl<T: Entity> Hash for OptionalChild<T>
where
    T::Id: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: Entity> SkipOnWriteBack for OptionalChild<T> {}

impl<T: Entity> FromMissingKey for OptionalChild<T> {
    fn from_missing_key(_key: &str, _siblings: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self::none())
    }
}

impl<'de, T: Entity> Deserialize<'de> for OptionalChild<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        OptionalParent::deserialize(deserializer).map(Self)
    }
}

impl<T: Entity> Serialize for OptionalChild<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
