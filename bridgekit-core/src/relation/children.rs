//! # Children
//!
//! The one-to-many collection generated for server properties declared with `@Children`
//! (and `@Siblings`). The server always sends related records in full for these, or
//! nothing at all.
//!
//! An empty collection means either that the server did not load the relationship or
//! that it has no members: the wire format does not distinguish the two.
use super::{Entity, FromMissingKey, SkipOnWriteBack};
use crate::error::DecodeError;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error as _, Visitor},
};
use serde_json::{Map, Value};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::Deref,
};

/// The related records of a one-to-many relationship, in server order.
///
/// `null`, a missing key and `[]` all decode to an empty collection. The field is left
/// out of write-back output.
#[derive(Debug, Clone)]
pub struct Children<T: Entity>(Vec<T>);

/// Many-to-many relations share the wire format of [`Children`].
pub type Siblings<T> = Children<T>;

impl<T: Entity> Children<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    /// Identifiers of the related records, in order.
    pub fn ids(&self) -> impl Iterator<Item = Option<&T::Id>> {
        self.0.iter().map(T::id)
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Entity> Default for Children<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Entity> Deref for Children<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Entity> From<Vec<T>> for Children<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T: Entity> FromIterator<T> for Children<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Entity> IntoIterator for Children<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Children<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Entity> PartialEq for Children<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.ids().eq(other.ids())
    }
}

impl<T: Entity> Eq for Children<T> where T::Id: Eq {}

impl<T: Entity> Hash for Children<T>
where
    T::Id: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.0.len());
        for id in self.ids() {
            id.hash(state);
        }
    }
}

impl<T: Entity> SkipOnWriteBack for Children<T> {}

impl<T: Entity> FromMissingKey for Children<T> {
    fn from_missing_key(_key: &str, _siblings: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self::empty())
    }
}

struct ChildrenVisitor<T>(PhantomData<T>);

impl<'de, T: Entity> Visitor<'de> for ChildrenVisitor<T> {
    type Value = Children<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of related records or null")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Children::empty())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Children::empty())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        Vec::<T>::deserialize(&payload)
            .map(Children)
            .map_err(|err| D::Error::custom(format!("{err} in '{payload}'")))
    }
}

impl<'de, T: Entity> Deserialize<'de> for Children<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(ChildrenVisitor(PhantomData))
    }
}

impl<T: Entity> Serialize for Children<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
