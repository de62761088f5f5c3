//! # API Method Calls
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, IgnoredAny},
    ser::SerializeMap,
};

/// A call to one method of a server-side API type.
///
/// The call itself is the request body. Generated code implements this for every
/// exported server method.
pub trait ApiMethodCall: Serialize {
    /// The decoded response body.
    type Output: DeserializeOwned;

    /// Sent in the `API-Type` header.
    const TYPE_NAME: &'static str;

    /// Sent in the `API-Method` header.
    const METHOD_ID: &'static str;
}

/// The output of methods that return nothing. Decodes from any payload, including an
/// empty body, and encodes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoReturnValue;

impl Serialize for NoReturnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

impl<'de> Deserialize<'de> for NoReturnValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoReturnValue)
    }
}
