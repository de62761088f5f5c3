//! # Record Decoding and Encoding
//!
//! Field-by-field routines for hand-written model codecs. They make the two relation
//! capabilities explicit:
//!
//! * [`RecordDecoder::tolerant_field`] asks [`FromMissingKey`] for a value when the key
//!   is absent. A present key, even with a `null` value, is decoded normally.
//! * [`RecordEncoder::skippable_field`] omits [`SkipOnWriteBack`] fields while the ambient
//!   mode is write-back.
//!
//! Every decode failure carries the field name and the raw sub-payload.
//!
//! Derived records decode through [`decode`] and [`decode_slice`], which report where
//! in the payload a failure happened. Plain `serde_json::from_value` only reports what
//! went wrong, so a shape mismatch would not name the relation field.
//!
//! ```rust
//! use bridgekit_core::{
//!     record::{RecordDecoder, RecordEncoder},
//!     relation::{Children, Entity, to_value_for_write_back},
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Member {
//!     id: Option<i64>,
//! }
//!
//! impl Entity for Member {
//!     type Id = i64;
//!
//!     fn id(&self) -> Option<&i64> {
//!         self.id.as_ref()
//!     }
//! }
//!
//! let payload = serde_json::json!({ "name": "Core" });
//! let record = RecordDecoder::new(&payload).unwrap();
//!
//! let name: String = record.field("name").unwrap();
//! let members: Children<Member> = record.tolerant_field("members").unwrap();
//! assert!(members.is_empty());
//!
//! let mut encoder = RecordEncoder::new();
//! encoder.field("name", &name).unwrap();
//! encoder.skippable_field("members", &members).unwrap();
//! assert_eq!(encoder.finish(), serde_json::json!({ "name": "Core", "members": [] }));
//! ```
use crate::{
    error::{DecodeError, EncodeError},
    relation::{FromMissingKey, SkipOnWriteBack},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Reads the fields of one JSON object.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> RecordDecoder<'a> {
    /// Fails with [`DecodeError::NotAnObject`] unless `payload` is a JSON object.
    pub fn new(payload: &'a Value) -> Result<Self, DecodeError> {
        payload
            .as_object()
            .map(Self::from_map)
            .ok_or_else(|| DecodeError::NotAnObject(payload.clone()))
    }

    pub fn from_map(object: &'a Map<String, Value>) -> Self {
        Self { object }
    }

    /// The whole object, i.e. every sibling of any field being decoded.
    pub fn object(&self) -> &'a Map<String, Value> {
        self.object
    }

    pub fn contains(&self, key: &str) -> bool {
        self.object.contains_key(key)
    }

    /// Decodes a required field. A missing key fails with [`DecodeError::MissingField`].
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError> {
        let raw = self
            .object
            .get(key)
            .ok_or_else(|| DecodeError::MissingField(key.to_string()))?;
        decode_present(key, raw)
    }

    /// Decodes a field that may be missing or `null`.
    pub fn optional_field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        match self.object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => decode_present(key, raw).map(Some),
        }
    }

    /// Decodes a field whose type supplies its own value when the key is missing.
    pub fn tolerant_field<T>(&self, key: &str) -> Result<T, DecodeError>
    where
        T: DeserializeOwned + FromMissingKey,
    {
        match self.object.get(key) {
            Some(raw) => decode_present(key, raw),
            None => T::from_missing_key(key, self.object),
        }
    }
}

/// Decodes a whole record, naming the path of the first value that failed.
///
/// ```rust
/// use bridgekit_core::{error::DecodeError, record::decode, relation::{Entity, Parent}};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Person {
///     id: Option<i64>,
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
/// #[derive(Deserialize)]
/// struct Pet {
///     owner: Parent<Person>,
/// }
///
/// let err = decode::<Pet>(&serde_json::json!({ "owner": "seven" })).err().unwrap();
/// assert!(matches!(err, DecodeError::Path { ref path, .. } if path == "owner"));
/// ```
pub fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(payload).map_err(path_error)
}

/// Like [`decode`], reading the record from raw JSON bytes.
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)?;
    deserializer.end().map_err(|source| DecodeError::Path {
        path: ".".to_string(),
        source,
    })?;
    Ok(value)
}

fn path_error(err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    DecodeError::Path {
        path: err.path().to_string(),
        source: err.into_inner(),
    }
}

fn decode_present<T: DeserializeOwned>(key: &str, raw: &Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(raw).map_err(|err| {
        let inner = err.path().to_string();
        let field = if inner == "." {
            key.to_string()
        } else {
            format!("{key}.{inner}")
        };

        DecodeError::Field {
            field,
            payload: raw.clone(),
            source: err.into_inner(),
        }
    })
}

/// Builds one JSON object field by field.
#[derive(Debug, Clone, Default)]
pub struct RecordEncoder {
    object: Map<String, Value>,
}

impl RecordEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `value` under `key`, replacing any previous value.
    pub fn field<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<&mut Self, EncodeError> {
        let encoded = serde_json::to_value(value).map_err(|source| EncodeError::Field {
            field: key.to_string(),
            source,
        })?;
        self.object.insert(key.to_string(), encoded);
        Ok(self)
    }

    /// Encodes `value` under `key` unless the ambient mode is write-back.
    pub fn skippable_field<T>(&mut self, key: &str, value: &T) -> Result<&mut Self, EncodeError>
    where
        T: Serialize + SkipOnWriteBack + ?Sized,
    {
        if value.skip_encoding() {
            return Ok(self);
        }
        self.field(key, value)
    }

    pub fn finish(self) -> Value {
        Value::Object(self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{
        Children, EncodingMode, Entity, OptionalChild, OptionalParent, Parent, with_encoding_mode,
    };
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: Option<u32>,
        label: String,
    }

    impl Entity for Tag {
        type Id = u32;

        fn id(&self) -> Option<&u32> {
            self.id.as_ref()
        }
    }

    #[test]
    fn test_rejects_non_objects() {
        let payload = json!([1, 2]);
        assert!(matches!(
            RecordDecoder::new(&payload),
            Err(DecodeError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let payload = json!({});
        let record = RecordDecoder::new(&payload).unwrap();

        let err = record.field::<Parent<Tag>>("tag").unwrap_err();
        assert!(matches!(err, DecodeError::MissingField(ref key) if key == "tag"));
    }

    #[test]
    fn test_missing_tolerant_fields_use_capability() {
        let payload = json!({ "name": "x" });
        let record = RecordDecoder::new(&payload).unwrap();

        let tags: Children<Tag> = record.tolerant_field("tags").unwrap();
        let main: OptionalParent<Tag> = record.tolerant_field("main").unwrap();
        let child: OptionalChild<Tag> = record.tolerant_field("child").unwrap();

        assert!(tags.is_empty());
        assert!(main.is_none());
        assert!(child.is_none());
    }

    #[test]
    fn test_present_key_is_decoded_normally() {
        let payload = json!({ "tags": [{ "id": 1, "label": "a" }], "main": { "id": 4 } });
        let record = RecordDecoder::new(&payload).unwrap();

        let tags: Children<Tag> = record.tolerant_field("tags").unwrap();
        let main: OptionalParent<Tag> = record.tolerant_field("main").unwrap();

        assert_eq!(tags.ids().collect::<Vec<_>>(), vec![Some(&1)]);
        assert_eq!(main.id(), Some(&4));
    }

    #[test]
    fn test_shape_mismatch_names_field_and_payload() {
        let payload = json!({ "tag": { "label": "orphan" } });
        let record = RecordDecoder::new(&payload).unwrap();

        match record.field::<Parent<Tag>>("tag").unwrap_err() {
            DecodeError::Field { field, payload, .. } => {
                assert_eq!(field, "tag");
                assert_eq!(payload, json!({ "label": "orphan" }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Distinguishes a missing key from a present `null` by what it decodes to.
    #[derive(Debug, PartialEq, Deserialize)]
    struct Seeded(Option<u64>);

    impl FromMissingKey for Seeded {
        fn from_missing_key(key: &str, siblings: &Map<String, Value>) -> Result<Self, DecodeError> {
            let seed = siblings.get("seed").and_then(Value::as_u64).ok_or_else(|| {
                DecodeError::MissingKeyRejected {
                    field: key.to_string(),
                    reason: "no seed".to_string(),
                }
            })?;
            Ok(Seeded(Some(seed + 100)))
        }
    }

    #[test]
    fn test_present_null_does_not_use_capability() {
        let payload = json!({ "seed": 1, "m": null });
        let record = RecordDecoder::new(&payload).unwrap();

        assert_eq!(record.tolerant_field::<Seeded>("m").unwrap(), Seeded(None));
    }

    #[test]
    fn test_missing_key_capability_sees_siblings() {
        let payload = json!({ "seed": 1 });
        let record = RecordDecoder::new(&payload).unwrap();
        assert_eq!(record.tolerant_field::<Seeded>("m").unwrap(), Seeded(Some(101)));

        let payload = json!({});
        let record = RecordDecoder::new(&payload).unwrap();
        let err = record.tolerant_field::<Seeded>("m").unwrap_err();
        assert!(matches!(err, DecodeError::MissingKeyRejected { ref field, .. } if field == "m"));
    }

    #[derive(Debug, Deserialize)]
    struct Labelled {
        #[allow(dead_code)]
        name: String,
        tag: Parent<Tag>,
    }

    #[test]
    fn test_decode_names_failing_relation_field() {
        let payload = json!({ "name": "x", "tag": { "label": "orphan" } });

        match decode::<Labelled>(&payload).unwrap_err() {
            DecodeError::Path { path, source } => {
                assert_eq!(path, "tag");
                assert!(source.to_string().contains("neither a full"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = decode_slice::<Labelled>(payload.to_string().as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode 'tag'"));
    }

    #[test]
    fn test_decode_accepts_valid_records() {
        let labelled: Labelled = decode(&json!({ "name": "x", "tag": { "id": 2 } })).unwrap();
        assert_eq!(labelled.tag.id(), &2);

        let labelled: Labelled = decode_slice(br#"{ "name": "x", "tag": { "id": 3 } }"#).unwrap();
        assert_eq!(labelled.tag.id(), &3);
    }

    #[test]
    fn test_optional_field() {
        let payload = json!({ "a": null, "b": 2 });
        let record = RecordDecoder::new(&payload).unwrap();

        assert_eq!(record.optional_field::<u32>("a").unwrap(), None);
        assert_eq!(record.optional_field::<u32>("b").unwrap(), Some(2));
        assert_eq!(record.optional_field::<u32>("c").unwrap(), None);
    }

    #[test]
    fn test_skippable_field_is_omitted_on_write_back() {
        let tags = Children::new(vec![Tag {
            id: Some(1),
            label: "a".into(),
        }]);

        let encode = || {
            let mut encoder = RecordEncoder::new();
            encoder.field("name", "x")?.skippable_field("tags", &tags)?;
            Ok::<_, EncodeError>(encoder.finish())
        };

        assert_eq!(
            encode().unwrap(),
            json!({ "name": "x", "tags": [{ "id": 1, "label": "a" }] })
        );
        assert_eq!(
            with_encoding_mode(EncodingMode::WriteBack, encode).unwrap(),
            json!({ "name": "x" })
        );
    }
}
