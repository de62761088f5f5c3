//! # Indirection Cell
//!
//! A heap-boxed holder for exactly one value.
//!
//! A struct cannot contain a field of its own type directly because its size would be
//! unbounded. Storing the value through [`Indirect`] keeps the direct storage of the
//! containing struct at the size of a pointer:
//!
//! ```rust
//! use bridgekit_core::relation::Indirect;
//!
//! struct Person {
//!     name: String,
//!     mentor: Option<Indirect<Person>>,
//! }
//!
//! let mut junior = Person { name: "Bob".into(), mentor: None };
//! junior.mentor = Some(Indirect::new(Person { name: "Alice".into(), mentor: None }));
//!
//! assert_eq!(junior.mentor.as_ref().map(|m| m.get().name.as_str()), Some("Alice"));
//! ```
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Debug},
    ops::{Deref, DerefMut},
};

/// Owns a single `T` through a heap allocation.
///
/// This type is not synchronized. Callers that share one across threads must do so
/// behind their own lock.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Indirect<T>(Box<T>);

impl<T> Indirect<T> {
    pub fn new(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Returns the stored value.
    pub fn get(&self) -> &T {
        &self.0
    }

    /// Returns the stored value mutably.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Replaces the stored value, reusing the existing allocation.
    pub fn set(&mut self, value: T) {
        *self.0 = value;
    }

    pub fn into_inner(self) -> T {
        *self.0
    }
}

impl<T> From<T> for Indirect<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Deref for Indirect<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for Indirect<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: Debug> Debug for Indirect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Serialize> Serialize for Indirect<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Indirect<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
