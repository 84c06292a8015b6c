//! Structured equality selectors over stored document fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::constants::DOC_TYPE_FIELD;

/// Equality predicate over top-level document fields.
///
/// A document matches when every named field is present and equal to the
/// selector's value. Fields are kept ordered so two selectors built in a
/// different order compare and render identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selector {
    fields: BTreeMap<String, Value>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector matching every document of one entity kind.
    pub fn doc_type(doc_type: &str) -> Self {
        Self::new().field(DOC_TYPE_FIELD, doc_type)
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(name, expected)| document.get(name) == Some(expected))
    }

    /// Matches raw stored bytes. Anything that is not a JSON object never matches.
    pub fn matches_bytes(&self, bytes: &[u8]) -> bool {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(document) if document.is_object() => self.matches(&document),
            _ => false,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        write!(f, "{{\"selector\":{}}}", rendered)
    }
}
