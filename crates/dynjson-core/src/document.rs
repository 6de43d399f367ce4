//! Documents: a root [`Value`] plus the parse and serialize entry points.
//!
//! [`Document::parse`] keeps every number literal exactly as spelled in the
//! input (see [`crate::parse`]). Serialization walks the tree back out through
//! serde_json and always produces compact JSON, re-emitting number text as is.
//!
//! The serde impls go through `serde_json::Value`, so a document deserialized
//! that way gets serde_json's spelling of its numbers (`1E5` reads as `1e+5`).

use crate::error::{DynJsonError, Result};
use crate::parse::parse_slice;
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// A parsed or programmatically built JSON document.
///
/// The root may be any kind of value, including a bare scalar. `Document`
/// dereferences to its root, so every navigation and coercion method on
/// [`Value`] is available directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse JSON bytes. Fails with [`DynJsonError::Parse`] on malformed input,
    /// including trailing non-whitespace after the value and nesting deeper
    /// than [`MAX_DEPTH`](crate::parse::MAX_DEPTH).
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        parse_slice(bytes).map(|root| Self { root })
    }

    /// Wrap any value as a document root, normalizing it.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self { root: value.into() }
    }

    /// A document whose root is an empty object.
    pub fn new_object() -> Self {
        Self {
            root: Value::new_object(),
        }
    }

    /// A document whose root is an empty array.
    pub fn new_array() -> Self {
        Self {
            root: Value::new_array(),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    /// Compact JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.root).map_err(DynJsonError::Serialize)
    }

    pub fn to_pretty_text(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).map_err(DynJsonError::Serialize)
    }
}

impl FromStr for Document {
    type Err = DynJsonError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text.as_bytes())
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl Deref for Document {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.root
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Document::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_scalars_are_documents() {
        for text in ["null", "true", "12.50", r#""s""#] {
            let doc: Document = text.parse().unwrap();
            assert_eq!(doc.to_text(), text);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for text in ["", "{", "[1,]", "{\"a\" 1}", "1 2", "nul"] {
            let err = Document::parse(text.as_bytes()).unwrap_err();
            assert!(matches!(err, DynJsonError::Parse(_)), "{text}: {err}");
        }
    }

    #[test]
    fn deref_exposes_root_methods() {
        let mut doc = Document::new_array();
        doc.array_append(1).array_append("two");
        assert!(doc.is_array());
        assert_eq!(doc.to_vec().unwrap(), br#"[1,"two"]"#);
        assert_eq!(doc.to_string(), r#"[1,"two"]"#);
        assert_eq!(doc.handle().at(1).as_string(None), "two");
    }

    #[test]
    fn serialize_error_surfaces() {
        let doc = Document::from(Value::Array(vec![Value::Number("NaN".into())]));
        assert!(matches!(doc.to_vec(), Err(DynJsonError::Serialize(_))));
        assert_eq!(doc.to_text(), "");
    }
}
