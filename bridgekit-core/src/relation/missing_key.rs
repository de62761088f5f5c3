//! # Missing-Key Tolerant Decoding
//!
//! The server omits the key of a relationship entirely when it was never loaded, which
//! is different from sending the key with a `null` value. Types implementing
//! [`FromMissingKey`] supply their own value in that situation instead of failing with a
//! missing-field error.
//!
//! There are two decoding paths that honour the capability:
//!
//! * [`crate::record::RecordDecoder::tolerant_field`] calls
//!   [`FromMissingKey::from_missing_key`] with the key and the sibling fields.
//! * `#[derive(Deserialize)]` records reach the wrappers through serde's implicit optional
//!   path, because every wrapper implementing this trait decodes through
//!   `deserialize_option` and resolves an absent value to the same result.
use crate::error::DecodeError;
use serde_json::{Map, Value};

/// Supplies a value for a field whose key is absent from the enclosing object.
pub trait FromMissingKey: Sized {
    /// Called when `key` is missing from the enclosing object. `siblings` contains the
    /// other fields of that object.
    fn from_missing_key(key: &str, siblings: &Map<String, Value>) -> Result<Self, DecodeError>;
}

impl<T> FromMissingKey for Option<T> {
    fn from_missing_key(_key: &str, _siblings: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(None)
    }
}
