//! # Projections
//!
//! Generates named, optional accessors on [`ParentReference`](super::ParentReference) for
//! the fields of a model.

/// Declares a trait with one accessor per listed field and implements it for
/// `ParentReference<Model>`.
///
/// Every accessor returns `Some(&field)` when the related record is materialized and
/// `None` otherwise.
///
/// ```rust
/// use bridgekit_core::{projections, relation::{Entity, ParentReference}};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// pub struct Person {
///     id: Option<i64>,
///     name: String,
///     age: u32,
/// }
///
/// impl Entity for Person {
///     type Id = i64;
///
///     fn id(&self) -> Option<&i64> {
///         self.id.as_ref()
///     }
/// }
///
/// projections! {
///     pub trait PersonFields for Person {
///         name: String,
///         age: u32,
///     }
/// }
///
/// let owner: ParentReference<Person> =
///     serde_json::from_value(serde_json::json!({ "id": 7, "name": "Alice", "age": 31 }))
///         .unwrap();
///
/// assert_eq!(owner.name().map(String::as_str), Some("Alice"));
/// assert_eq!(owner.age(), Some(&31));
/// ```
#[macro_export]
macro_rules! projections {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $model:ty {
            $($field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                fn $field(&self) -> ::core::option::Option<&$ty>;
            )*
        }

        impl $name for $crate::relation::ParentReference<$model> {
            $(
                fn $field(&self) -> ::core::option::Option<&$ty> {
                    self.project(|value| &value.$field)
                }
            )*
        }
    };
}
