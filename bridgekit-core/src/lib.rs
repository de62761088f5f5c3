//! # Bridgekit Core
//!
//! `bridgekit-core` is a client-side data layer for backends that serialize their
//! relational models (Fluent-style `@Parent`, `@OptionalParent`, `@Children`, ...) as JSON.
//! It lets application code work with those models as plain Rust values while staying
//! wire-compatible with the two shapes the server uses for a relationship:
//!
//! * **Identifier only:** `{"id": 7}`
//! * **Fully materialized:** `{"id": 7, "name": "Alice", ...}`
//!
//! ## Key Components
//!
//! * **[`relation`]:** The relation reference family ([`Parent`], [`OptionalParent`],
//!   [`OptionalChild`], [`Children`] and the projected [`ParentReference`]). Each of them
//!   probes both wire shapes on decode and picks its output shape on encode according to
//!   the ambient [`EncodingMode`].
//! * **[`record`]:** Explicit object decoding/encoding routines that honour the
//!   [`FromMissingKey`] and [`SkipOnWriteBack`] capabilities for hand-written models.
//! * **[`api`]:** A small remote call layer ([`api::Api`], [`api::BridgeClient`]) that
//!   posts typed calls to the server and broadcasts every failure to any number of
//!   subscribers.
//!
//! ## Derived models
//!
//! The wrappers work with `#[derive(Serialize, Deserialize)]` out of the box:
//!
//! ```rust
//! use bridgekit_core::relation::{Entity, OptionalParent, Parent};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Person {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! impl Entity for Person {
//!     type Id = i64;
//!
//!     fn id(&self) -> Option<&i64> {
//!         self.id.as_ref()
//!     }
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Pet {
//!     id: Option<i64>,
//!     owner: Parent<Person>,
//!     sitter: OptionalParent<Person>,
//! }
//!
//! let pet: Pet = bridgekit_core::record::decode(&serde_json::json!({
//!     "id": 1,
//!     "owner": { "id": 7, "name": "Alice" },
//! }))
//! .unwrap();
//!
//! assert_eq!(pet.owner.id(), &7);
//! assert_eq!(pet.owner.value().map(|p| p.name.as_str()), Some("Alice"));
//! assert_eq!(pet.sitter.id(), None);
//! ```
//!
//! [`record::decode`] works like `serde_json::from_value` but a failure names the field
//! it happened in, e.g. `owner` when the owner matches neither reference shape.
pub mod api;
pub mod error;
pub mod record;
pub mod relation;

pub use error::{DecodeError, EncodeError, RelationError};
pub use relation::{
    Children, EncodingMode, Entity, FromMissingKey, Indirect, OptionalChild, OptionalParent,
    Parent, ParentReference, Siblings, SkipOnWriteBack,
};

/// Type alias for the standard boxed error used by transports.
pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
