//! # Relation Errors
//!
//! Errors raised while building, decoding or encoding relation references and the
//! records that contain them.
use serde_json::Value;

/// Errors that can occur when constructing a relation reference or when a wire value
/// cannot be interpreted as one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    #[error("Cannot reference a '{0}' without an identifier")]
    Unidentified(&'static str),
    #[error("A reference to '{0}' requires an identifier, found null")]
    NullIdentifier(&'static str),
    #[error("Value matches neither a full '{related}' nor an identifier-only object: '{payload}'")]
    ShapeMismatch {
        related: &'static str,
        payload: Value,
    },
}

impl RelationError {
    pub(crate) fn unidentified<T>() -> Self {
        RelationError::Unidentified(std::any::type_name::<T>())
    }
}

/// Errors that can occur when decoding a record field by field.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Expected a JSON object, found '{0}'")]
    NotAnObject(Value),
    #[error("Missing required field '{0}'")]
    MissingField(String),
    #[error("Failed to decode field '{field}' from '{payload}': '{source}'")]
    Field {
        field: String,
        payload: Value,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to decode '{path}': '{source}'")]
    Path {
        /// Dotted location of the failing value, e.g. `owner` or `members.2.mentor`.
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Field '{field}' could not be resolved from the surrounding record: '{reason}'")]
    MissingKeyRejected { field: String, reason: String },
}

/// Errors that can occur when encoding a record field by field.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to encode field '{field}': '{source}'")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}
