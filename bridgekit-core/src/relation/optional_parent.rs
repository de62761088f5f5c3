//! # Optional Parent
//!
//! The optional single-cardinality reference, generated for server properties declared
//! with `@OptionalParent`.
use super::{Entity, FromMissingKey, Indirect, RelationShape, shape::encode_reference};
use crate::error::{DecodeError, RelationError};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error as _, Visitor},
};
use serde_json::{Map, Value};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// A reference to a related record that may be absent.
///
/// A missing key, an explicit `null` and `{"id": null}` all decode to a reference without
/// identifier. Changing the identifier, including clearing it, drops the cached record.
#[derive(Debug, Clone)]
pub struct OptionalParent<T: Entity> {
    id: Option<T::Id>,
    value: Option<Indirect<T>>,
}

impl<T: Entity> Default for OptionalParent<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T: Entity> OptionalParent<T> {
    /// Creates a reference containing only an identifier (or none).
    pub fn new(id: Option<T::Id>) -> Self {
        Self { id, value: None }
    }

    /// Creates a reference that points at nothing.
    pub fn none() -> Self {
        Self::new(None)
    }

    /// Creates a reference holding the full related record.
    ///
    /// Fails with [`RelationError::Unidentified`] when the record has no identifier.
    pub fn from_value(value: T) -> Result<Self, RelationError> {
        let id = value.id().cloned().ok_or_else(RelationError::unidentified::<T>)?;
        Ok(Self {
            id: Some(id),
            value: Some(Indirect::new(value)),
        })
    }

    pub fn id(&self) -> Option<&T::Id> {
        self.id.as_ref()
    }

    /// Points the reference at another record, or at nothing.
    ///
    /// The cached record is dropped unless it has the new identifier.
    pub fn set_id(&mut self, id: Option<T::Id>) {
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

    pub fn take_value(&mut self) -> Option<T> {
        self.value.take().map(Indirect::into_inner)
    }

    pub fn is_materialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.id.is_none()
    }

    pub fn into_value(self) -> Option<T> {
        self.value.map(Indirect::into_inner)
    }

    fn from_payload(payload: &Value) -> Result<Self, RelationError> {
        match RelationShape::<T>::probe(payload)? {
            RelationShape::Materialized(value) => Self::from_value(value),
            RelationShape::IdentifierOnly(id) => Ok(Self::new(id)),
        }
    }
}

impl<T: Entity> From<Option<T::Id>> for OptionalParent<T> {
    fn from(id: Option<T::Id>) -> Self {
        Self::new(id)
    }
}

impl<T: Entity> PartialEq for OptionalParent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Entity> Eq for OptionalParent<T> where T::Id: Eq {}

impl<T: Entity> Hash for OptionalParent<T>
where
    T::Id: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: Entity> FromMissingKey for OptionalParent<T> {
    fn from_missing_key(_key: &str, _siblings: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Self::none())
    }
}

struct OptionalParentVisitor<T>(PhantomData<T>);

impl<'de, T: Entity> Visitor<'de> for OptionalParentVisitor<T> {
    type Value = OptionalParent<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a related record, an identifier-only object or null")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalParent::none())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(OptionalParent::none())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        OptionalParent::from_payload(&payload).map_err(D::Error::custom)
    }
}

impl<'de, T: Entity> Deserialize<'de> for OptionalParent<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(OptionalParentVisitor(PhantomData))
    }
}

impl<T: Entity> Serialize for OptionalParent<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_reference(self.id(), self.value(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: Option<u32>,
        label: String,
    }

    impl Entity for Tag {
        type Id = u32;

        fn id(&self) -> Option<&u32> {
            self.id.as_ref()
        }
    }

    #[test]
    fn test_null_and_null_identifier_decode_to_none() {
        for payload in [json!(null), json!({ "id": null })] {
            let parent: OptionalParent<Tag> = serde_json::from_value(payload).unwrap();
            assert!(parent.is_none());
            assert!(!parent.is_materialized());
        }
    }

    #[test]
    fn test_clearing_identifier_clears_materialized() {
        let mut parent = OptionalParent::from_value(Tag {
            id: Some(1),
            label: "a".into(),
        })
        .unwrap();

        parent.set_id(None);
        assert!(parent.is_none());
        assert!(parent.value().is_none());
    }

    #[test]
    fn test_encode_without_identifier_writes_explicit_null() {
        let parent = OptionalParent::<Tag>::none();
        assert_eq!(serde_json::to_value(&parent).unwrap(), json!({ "id": null }));
    }

    #[test]
    fn test_from_missing_key_is_none() {
        let parent = OptionalParent::<Tag>::from_missing_key("tag", &Map::new()).unwrap();
        assert_eq!(parent, OptionalParent::none());
    }
}
