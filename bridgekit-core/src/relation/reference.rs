//! # Parent Reference
//!
//! A [`Parent`] that also exposes the attributes of the related record directly, each as
//! an `Option` that is `None` while only the identifier is known.
//!
//! ```rust
//! # use bridgekit_core::relation::{Entity, ParentReference};
//! # use serde::{Deserialize, Serialize};
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Person {
//!     id: Option<i64>,
//!     name: String,
//! }
//! # impl Entity for Person {
//! #     type Id = i64;
//! #     fn id(&self) -> Option<&i64> { self.id.as_ref() }
//! # }
//!
//! let full: ParentReference<Person> =
//!     serde_json::from_value(serde_json::json!({ "id": 7, "name": "Alice" })).unwrap();
//! assert_eq!(full.project(|p| &p.name).map(String::as_str), Some("Alice"));
//!
//! let bare: ParentReference<Person> =
//!     serde_json::from_value(serde_json::json!({ "id": 7 })).unwrap();
//! assert_eq!(bare.project(|p| &p.name), None);
//! ```
//!
//! The [`projections!`](crate::projections) macro turns a list of fields into named
//! accessors, e.g. `reference.name()`.
use super::{Entity, Parent};
use crate::error::RelationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

/// A required reference with read-only projections into the related record.
#[derive(Debug, Clone)]
pub struct ParentReference<T: Entity> {
    inner: Parent<T>,
}

impl<T: Entity> ParentReference<T> {
    pub fn new(id: T::Id) -> Self {
        Self {
            inner: Parent::new(id),
        }
    }

    /// Fails with [`RelationError::Unidentified`] when the record has no identifier.
    pub fn from_value(value: T) -> Result<Self, RelationError> {
        Parent::from_value(value).map(|inner| Self { inner })
    }

    /// Borrows an attribute of the related record, if it is present.
    pub fn project<'a, R: ?Sized>(&'a self, field: impl FnOnce(&'a T) -> &'a R) -> Option<&'a R> {
        self.inner.value().map(field)
    }

    /// Computes a value from the related record, if it is present.
    pub fn get<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.value().map(f)
    }

    pub fn into_inner(self) -> Parent<T> {
        self.inner
    }
}

impl<T: Entity> Deref for ParentReference<T> {
    type Target = Parent<T>;

    fn deref(&self) -> &Parent<T> {
        &self.inner
    }
}

impl<T: Entity> DerefMut for ParentReference<T> {
    fn deref_mut(&mut self) -> &mut Parent<T> {
        &mut self.inner
    }
}

impl<T: Entity> From<Parent<T>> for ParentReference<T> {
    fn from(inner: Parent<T>) -> Self {
        Self { inner }
    }
}

impl<T: Entity> PartialEq for ParentReference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Entity> Eq for ParentReference<T> where T::Id: Eq {}

impl<T: Entity> Hash for ParentReference<T>
where
    T::Id: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<'de, T: Entity> Deserialize<'de> for ParentReference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Parent::deserialize(deserializer).map(|inner| Self { inner })
    }
}

impl<T: Entity> Serialize for ParentReference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}
