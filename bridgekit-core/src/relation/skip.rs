//! # Skip-on-Write-Back
//!
//! The persistence layer never reads `@Children` or `@OptionalChild` payloads, so those
//! fields are left out of the output entirely while the ambient mode is
//! [`EncodingMode::WriteBack`](super::EncodingMode::WriteBack).
//!
//! For derived records, annotate the field:
//!
//! ```rust,ignore
//! #[serde(skip_serializing_if = "bridgekit_core::relation::skip_on_write_back")]
//! members: Children<Person>,
//! ```
//!
//! Hand-written encoders use [`crate::record::RecordEncoder::skippable_field`].
use super::mode::is_encoding_for_write_back;

/// Marks a field type that is omitted from write-back output.
pub trait SkipOnWriteBack {
    /// Returns `true` when the field should be left out of the current encode.
    fn skip_encoding(&self) -> bool {
        is_encoding_for_write_back()
    }
}

/// Predicate for `#[serde(skip_serializing_if = "...")]`.
pub fn skip_on_write_back<T: SkipOnWriteBack + ?Sized>(value: &T) -> bool {
    value.skip_encoding()
}
