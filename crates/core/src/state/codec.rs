//! Entity codec: domain models to and from world-state bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::constants::DOC_TYPE_FIELD;
use crate::errors::{Result, StateError};

/// A domain entity persisted as one world-state record keyed by its id.
pub trait Document: Serialize + DeserializeOwned {
    /// Discriminator written into the stored document.
    const DOC_TYPE: &'static str;

    /// Store key of this entity.
    fn id(&self) -> &str;
}

/// Serializes a document to JSON bytes, stamping its `docType`.
pub fn encode<T: Document>(document: &T) -> Result<Vec<u8>> {
    let mut value = serde_json::to_value(document).map_err(StateError::Codec)?;
    if let Value::Object(ref mut map) = value {
        map.insert(
            DOC_TYPE_FIELD.to_string(),
            Value::String(T::DOC_TYPE.to_string()),
        );
    }
    Ok(serde_json::to_vec(&value).map_err(StateError::Codec)?)
}

/// Deserializes the document stored at `key`, checking its `docType`.
pub fn decode<T: Document>(key: &str, bytes: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(bytes).map_err(StateError::Codec)?;
    let found = value
        .get(DOC_TYPE_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if found != T::DOC_TYPE {
        return Err(StateError::DocTypeMismatch {
            key: key.to_string(),
            expected: T::DOC_TYPE.to_string(),
            found: found.to_string(),
        }
        .into());
    }
    Ok(serde_json::from_value(value).map_err(StateError::Codec)?)
}
