//! # Parent
//!
//! The required single-cardinality reference, generated for server properties declared
//! with `@Parent`.
use super::{Entity, Indirect, RelationShape, shape::encode_reference};
use crate::error::RelationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// A reference to a related record that always has an identifier.
///
/// If the server embedded the full related record, or the reference was built from one,
/// it is available through [`Parent::value`]. The cached record always has the same
/// identifier as the reference: changing the identifier drops it.
///
/// ```rust
/// # use bridgekit_core::relation::{Entity, Parent};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Clone, Serialize, Deserialize)]
/// # struct Person { id: Option<i64>, name: String }
/// # impl Entity for Person {
/// #     type Id = i64;
/// #     fn id(&self) -> Option<&i64> { self.id.as_ref() }
/// # }
/// let alice = Person { id: Some(7), name: "Alice".into() };
/// let mut owner = Parent::from_value(alice).unwrap();
/// assert!(owner.is_materialized());
///
/// owner.set_id(8);
/// assert!(!owner.is_materialized());
/// ```
#[derive(Debug, Clone)]
pub struct Parent<T: Entity> {
    id: T::Id,
    value: Option<Indirect<T>>,
}

impl<T: Entity> Parent<T> {
    /// Creates a reference containing only an identifier.
    pub fn new(id: T::Id) -> Self {
        Self { id, value: None }
    }

    /// Creates a reference holding the full related record.
    ///
    /// Fails with [`RelationError::Unidentified`] when the record has no identifier.
    pub fn from_value(value: T) -> Result<Self, RelationError> {
        let id = value.id().cloned().ok_or_else(RelationError::unidentified::<T>)?;
        Ok(Self {
            id,
            value: Some(Indirect::new(value)),
        })
    }

    /// The identifier of the related record.
    pub fn id(&self) -> &T::Id {
        &self.id
    }

    /// Points the reference at another record.
    ///
    /// The cached record is dropped unless it has the new identifier.
    pub fn set_id(&mut self, id: T::Id) {
        if self.id != id {
            self.value = None;
        }
        self.id = id;
    }

    /// The full related record, if the server sent it.
    pub fn value(&self) -> Option<&T> {
        self.value.as_deref()
    }

    /// Replaces the cached record and takes over its identifier.
    pub fn set_value(&mut self, value: T) -> Result<(), RelationError> {
        *self = Self::from_value(value)?;
        Ok(())
    }

    /// Removes the cached record, keeping only the identifier.
    pub fn take_value(&mut self) -> Option<T> {
        self.value.take().map(Indirect::into_inner)
    }

    pub fn is_materialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_value(self) -> Option<T> {
        self.value.map(Indirect::into_inner)
    }
}

impl<T: Entity> PartialEq for Parent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Entity> Eq for Parent<T> where T::Id: Eq {}

impl<T: Entity> Hash for Parent<T>
where
    T::Id: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'de, T: Entity> Deserialize<'de> for Parent<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;

        match RelationShape::<T>::probe(&payload).map_err(D::Error::custom)? {
            RelationShape::Materialized(value) => Self::from_value(value).map_err(D::Error::custom),
            RelationShape::IdentifierOnly(Some(id)) => Ok(Self::new(id)),
            RelationShape::IdentifierOnly(None) => Err(D::Error::custom(
                RelationError::NullIdentifier(std::any::type_name::<T>()),
            )),
        }
    }
}

impl<T: Entity> Serialize for Parent<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_reference(Some(&self.id), self.value(), serializer)
    }
}
