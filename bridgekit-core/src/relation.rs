//! # Relation References
//!
//! This module contains the value types that stand in for a link from one record to
//! another. The server sends each relationship either as the related record's identifier
//! (`{"id": 7}`) or as the full related record, depending on whether it was eagerly
//! loaded. Every wrapper here accepts both shapes and remembers the richer one.
//!
//! | Wrapper                 | Server property    | Missing key | On write-back        |
//! |-------------------------|--------------------|-------------|----------------------|
//! | [`Parent`]              | `@Parent`          | error       | `{"id": ...}`        |
//! | [`ParentReference`]     | `@Parent`          | error       | `{"id": ...}`        |
//! | [`OptionalParent`]      | `@OptionalParent`  | no id       | `{"id": ...}`        |
//! | [`OptionalChild`]       | `@OptionalChild`   | no id       | omitted              |
//! | [`Children`]            | `@Children`        | empty       | omitted              |
//!
//! Equality and hashing of every wrapper only consider identifiers, never the cached
//! related value.
//!
//! A reference is owned by exactly one record. Sharing one across threads requires
//! external synchronization.
pub mod children;
pub mod indirect;
pub mod missing_key;
pub mod mode;
pub mod optional_child;
pub mod optional_parent;
pub mod parent;
pub mod projection;
pub mod reference;
pub mod shape;
pub mod skip;

pub use children::{Children, Siblings};
pub use indirect::Indirect;
pub use missing_key::FromMissingKey;
pub use mode::{
    EncodingMode, encoding_mode, is_encoding_for_write_back, scope_encoding_mode,
    to_value_for_write_back, to_vec_for_write_back, with_encoding_mode,
};
pub use optional_child::OptionalChild;
pub use optional_parent::OptionalParent;
pub use parent::Parent;
pub use reference::ParentReference;
pub use shape::RelationShape;
pub use skip::{SkipOnWriteBack, skip_on_write_back};

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// A record type that can be the target of a relation reference.
///
/// Identifiers are optional on the record itself because a record built locally has not
/// been assigned one by the server yet.
pub trait Entity: Serialize + DeserializeOwned {
    /// The identifier type of the record (e.g. `i64` or `uuid::Uuid`).
    type Id: Clone + PartialEq + Debug + Serialize + DeserializeOwned;

    /// Returns the identifier of this record, if it has one.
    fn id(&self) -> Option<&Self::Id>;
}
