//! # Wire Shapes
//!
//! A single-cardinality relationship arrives in one of two shapes, chosen per response by
//! whether the server eagerly loaded it:
//!
//! * the full related record, carrying at least its identifier, or
//! * an object holding only the identifier: `{"id": 7}` (or `{"id": null}` for optional
//!   relations).
//!
//! [`RelationShape::probe`] tries the richer shape first and falls back to the
//! identifier-only shape. The encoding side lives in [`encode_reference`].
use super::{Entity, mode::is_encoding_for_write_back};
use crate::error::RelationError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

const ID_KEY: &str = "id";

/// The decoded form of a single relation payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationShape<T: Entity> {
    /// The server embedded the full related record, with a non-null identifier.
    Materialized(T),
    /// The server only sent the identifier, which may be null for optional relations.
    IdentifierOnly(Option<T::Id>),
}

impl<T: Entity> RelationShape<T> {
    /// Classifies `payload` as either a materialized record or an identifier-only object.
    ///
    /// A full record whose identifier is unset is not accepted as materialized, since the
    /// reference would have nothing to point at.
    pub fn probe(payload: &Value) -> Result<Self, RelationError> {
        match T::deserialize(payload) {
            Ok(value) if value.id().is_some() => return Ok(RelationShape::Materialized(value)),
            Ok(_) => trace!(
                related = std::any::type_name::<T>(),
                "Full record has no identifier, probing identifier-only shape"
            ),
            Err(err) => trace!(
                related = std::any::type_name::<T>(),
                error = %err,
                "Payload is not a full record, probing identifier-only shape"
            ),
        }

        let mismatch = || RelationError::ShapeMismatch {
            related: std::any::type_name::<T>(),
            payload: payload.clone(),
        };

        let raw_id = payload
            .as_object()
            .and_then(|object| object.get(ID_KEY))
            .ok_or_else(mismatch)?;

        let id = Option::<T::Id>::deserialize(raw_id).map_err(|_| mismatch())?;

        Ok(RelationShape::IdentifierOnly(id))
    }
}

#[derive(Serialize)]
struct IdentifierOnly<'a, Id> {
    id: Option<&'a Id>,
}

/// Encodes a single reference.
///
/// The materialized record is written in full unless the ambient mode is write-back. If
/// encoding it fails the reference degrades to `{"id": ...}` instead of failing. A null
/// identifier is written as an explicit `{"id": null}`.
pub(crate) fn encode_reference<S, T>(
    id: Option<&T::Id>,
    materialized: Option<&T>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Entity,
{
    if let Some(value) = materialized
        && !is_encoding_for_write_back()
    {
        match serde_json::to_value(value) {
            Ok(full) => return full.serialize(serializer),
            Err(err) => debug!(
                related = std::any::type_name::<T>(),
                error = %err,
                "Could not encode materialized record, falling back to its identifier"
            ),
        }
    }

    IdentifierOnly { id }.serialize(serializer)
}
