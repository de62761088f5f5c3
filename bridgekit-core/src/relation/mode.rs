//! # Ambient Encoding Mode
//!
//! Relation references encode differently depending on who reads the output:
//!
//! * [`EncodingMode::Transmit`] (default): the payload goes to a peer that understands
//!   materialized relationships, so cached related records are sent in full.
//! * [`EncodingMode::WriteBack`]: the payload goes to a persistence layer that only reads
//!   identifiers. References collapse to `{"id": ...}` and collection-shaped relations
//!   are omitted.
//!
//! The mode is a task-local binding. An override applies to the closure or future it
//! wraps and is restored when that scope ends, so concurrent encodes on other threads or
//! tasks never observe it.
//!
//! ```rust
//! use bridgekit_core::relation::{EncodingMode, encoding_mode, with_encoding_mode};
//!
//! assert_eq!(encoding_mode(), EncodingMode::Transmit);
//!
//! with_encoding_mode(EncodingMode::WriteBack, || {
//!     assert_eq!(encoding_mode(), EncodingMode::WriteBack);
//! });
//!
//! assert_eq!(encoding_mode(), EncodingMode::Transmit);
//! ```
use serde::Serialize;
use std::future::Future;

tokio::task_local! {
    static ENCODING_MODE: EncodingMode;
}

/// Who the current serialization pass is producing output for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingMode {
    /// Full shape, sent to the peer.
    #[default]
    Transmit,
    /// Identifier-only shape, sent to a relationship-unaware persistence layer.
    WriteBack,
}

impl EncodingMode {
    pub fn is_write_back(self) -> bool {
        matches!(self, EncodingMode::WriteBack)
    }
}

/// Returns the mode bound to the current call chain, or the default when none is bound.
pub fn encoding_mode() -> EncodingMode {
    ENCODING_MODE.try_with(|mode| *mode).unwrap_or_default()
}

/// Shorthand for `encoding_mode().is_write_back()`.
pub fn is_encoding_for_write_back() -> bool {
    encoding_mode().is_write_back()
}

/// Runs `f` with `mode` bound. The previous mode is restored when `f` returns or panics.
pub fn with_encoding_mode<R>(mode: EncodingMode, f: impl FnOnce() -> R) -> R {
    ENCODING_MODE.sync_scope(mode, f)
}

/// Drives `future` with `mode` bound for every poll.
///
/// Use this when the encode happens inside an async call, e.g. around
/// [`crate::api::Api::perform`].
pub async fn scope_encoding_mode<F: Future>(mode: EncodingMode, future: F) -> F::Output {
    ENCODING_MODE.scope(mode, future).await
}

/// Encodes `value` into a [`serde_json::Value`] for a write-back.
pub fn to_value_for_write_back<T: Serialize + ?Sized>(
    value: &T,
) -> serde_json::Result<serde_json::Value> {
    with_encoding_mode(EncodingMode::WriteBack, || serde_json::to_value(value))
}

/// Encodes `value` into JSON bytes for a write-back.
pub fn to_vec_for_write_back<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    with_encoding_mode(EncodingMode::WriteBack, || serde_json::to_vec(value))
}
