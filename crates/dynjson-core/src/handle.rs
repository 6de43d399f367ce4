//! Handles: chainable references into a value tree.
//!
//! A [`Handle`] borrows the value at some position, or is *absent* when the
//! position does not exist. Every step on an absent handle yields another absent
//! handle, and coercions on an absent handle behave like coercions on `Null`, so a
//! whole path can be written optimistically and the fallback given once:
//!
//! ```
//! use dynjson_core::Document;
//!
//! let doc: Document = r#"{"a":{"b":[7]}}"#.parse().unwrap();
//! assert_eq!(doc.handle().get("a").get("b").at(0).as_int(None), 7);
//! assert_eq!(doc.handle().get("a").get("zzz").at(3).as_int(Some(-1)), 0);
//! assert!(doc.handle().path("a.zzz.3").is_absent());
//! ```
//!
//! [`HandleMut`] is the writing counterpart: mutations through an absent handle
//! are ignored.

use crate::coerce::{coerce_bool, coerce_f64, coerce_i64, coerce_string, CoerceError};
use crate::map::Map;
use crate::value::{Kind, Value};

/// What an absent handle reads as.
static ABSENT: Value = Value::Null;

impl Value {
    /// Start a read-only chain at this value.
    pub fn handle(&self) -> Handle<'_> {
        Handle::new(self)
    }

    /// Start a mutable chain at this value.
    pub fn handle_mut(&mut self) -> HandleMut<'_> {
        HandleMut::new(self)
    }
}

/// A read-only reference to the value at a position, possibly absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle<'a> {
    value: Option<&'a Value>,
}

impl<'a> Handle<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    /// True when the position this handle names does not exist.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// The kind of the referenced value; `None` when absent.
    pub fn kind(&self) -> Option<Kind> {
        self.value.map(Value::kind)
    }

    fn read(&self) -> &'a Value {
        self.value.unwrap_or(&ABSENT)
    }

    /// The entry under `key` of an object.
    pub fn get(&self, key: &str) -> Handle<'a> {
        Handle {
            value: self.value.and_then(|v| v.object_get(key)),
        }
    }

    /// The element at `index` of an array.
    pub fn at(&self, index: usize) -> Handle<'a> {
        Handle {
            value: self.value.and_then(|v| v.array_get(index)),
        }
    }

    /// The last element of an array.
    pub fn last(&self) -> Handle<'a> {
        Handle {
            value: self.value.and_then(Value::array_last),
        }
    }

    /// Follow a dot-separated path such as `"items.2.name"`.
    ///
    /// A segment that parses as an index steps into an array; any other segment,
    /// or any segment applied to a non-array, is an object key. The empty path
    /// is this handle itself.
    pub fn path(&self, path: &str) -> Handle<'a> {
        if path.is_empty() {
            return *self;
        }
        path.split('.').fold(*self, |current, segment| {
            match (current.value, segment.parse::<usize>()) {
                (Some(Value::Array(_)), Ok(index)) => current.at(index),
                _ => current.get(segment),
            }
        })
    }

    pub fn exists(&self, key: &str) -> bool {
        self.value.is_some_and(|v| v.exists(key))
    }

    pub fn is_array(&self) -> bool {
        self.value.is_some_and(Value::is_array)
    }

    pub fn is_object(&self) -> bool {
        self.value.is_some_and(Value::is_object)
    }

    /// Element or entry count of a referenced container.
    pub fn len(&self) -> Option<usize> {
        self.value.and_then(Value::len)
    }

    pub fn as_bool(&self, default: Option<bool>) -> bool {
        self.read().as_bool(default)
    }

    pub fn as_int(&self, default: Option<i64>) -> i64 {
        self.read().as_int(default)
    }

    pub fn as_float(&self, default: Option<f64>) -> f64 {
        self.read().as_float(default)
    }

    pub fn as_string(&self, default: Option<&str>) -> String {
        self.read().as_string(default)
    }

    pub fn as_array(&self, default: Option<&'a [Value]>) -> &'a [Value] {
        self.read().as_array(default)
    }

    pub fn as_object(&self, default: Option<&'a Map>) -> &'a Map {
        self.read().as_object(default)
    }

    /// Fallible coercions, for callers that want to see the failure.
    pub fn try_bool(&self) -> Result<bool, CoerceError> {
        coerce_bool(self.read())
    }

    pub fn try_int(&self) -> Result<i64, CoerceError> {
        coerce_i64(self.read())
    }

    pub fn try_float(&self) -> Result<f64, CoerceError> {
        coerce_f64(self.read())
    }

    pub fn try_string(&self) -> Result<String, CoerceError> {
        coerce_string(self.read())
    }

    /// Compact JSON of the referenced value; `"null"` when absent.
    pub fn to_text(&self) -> String {
        self.read().to_text()
    }

    /// An owned copy of the referenced value; `Null` when absent.
    pub fn cloned(&self) -> Value {
        self.read().clone()
    }
}

impl<'a> From<&'a Value> for Handle<'a> {
    fn from(value: &'a Value) -> Self {
        Handle::new(value)
    }
}

/// A mutable reference to the value at a position, possibly absent.
#[derive(Debug)]
pub struct HandleMut<'a> {
    value: Option<&'a mut Value>,
}

impl<'a> HandleMut<'a> {
    pub fn new(value: &'a mut Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    fn from_option(value: Option<&'a mut Value>) -> Self {
        Self { value }
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Reborrow as a read-only handle for navigation and coercion.
    pub fn handle(&self) -> Handle<'_> {
        Handle {
            value: self.value.as_deref(),
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut Value> {
        self.value.as_deref_mut()
    }

    pub fn into_value_mut(self) -> Option<&'a mut Value> {
        self.value
    }

    /// Replace the referenced value. Ignored when absent.
    pub fn set(&mut self, value: impl Into<Value>) -> &mut Self {
        if let Some(slot) = self.value.as_deref_mut() {
            *slot = value.into();
        }
        self
    }

    pub fn array_append(&mut self, item: impl Into<Value>) -> &mut Self {
        if let Some(value) = self.value.as_deref_mut() {
            value.array_append(item);
        }
        self
    }

    pub fn object_set(&mut self, key: impl Into<String>, item: impl Into<Value>) -> &mut Self {
        if let Some(value) = self.value.as_deref_mut() {
            value.object_set(key, item);
        }
        self
    }

    /// Append an empty array and return a handle to it.
    pub fn array_new_array(&mut self) -> HandleMut<'_> {
        HandleMut::from_option(self.value.as_deref_mut().and_then(Value::array_new_array))
    }

    /// Append an empty object and return a handle to it.
    pub fn array_new_object(&mut self) -> HandleMut<'_> {
        HandleMut::from_option(self.value.as_deref_mut().and_then(Value::array_new_object))
    }

    /// Set `key` to an empty array and return a handle to it.
    pub fn object_new_array(&mut self, key: impl Into<String>) -> HandleMut<'_> {
        HandleMut::from_option(
            self.value
                .as_deref_mut()
                .and_then(|v| v.object_new_array(key)),
        )
    }

    /// Set `key` to an empty object and return a handle to it.
    pub fn object_new_object(&mut self, key: impl Into<String>) -> HandleMut<'_> {
        HandleMut::from_option(
            self.value
                .as_deref_mut()
                .and_then(|v| v.object_new_object(key)),
        )
    }

    pub fn get_mut(&mut self, key: &str) -> HandleMut<'_> {
        HandleMut::from_option(self.value.as_deref_mut().and_then(|v| v.object_get_mut(key)))
    }

    pub fn at_mut(&mut self, index: usize) -> HandleMut<'_> {
        HandleMut::from_option(
            self.value
                .as_deref_mut()
                .and_then(|v| v.array_get_mut(index)),
        )
    }

    /// Consuming form of [`get_mut`](Self::get_mut) that keeps the original lifetime.
    pub fn into_get(self, key: &str) -> HandleMut<'a> {
        HandleMut::from_option(self.value.and_then(|v| v.object_get_mut(key)))
    }

    /// Consuming form of [`at_mut`](Self::at_mut) that keeps the original lifetime.
    pub fn into_at(self, index: usize) -> HandleMut<'a> {
        HandleMut::from_option(self.value.and_then(|v| v.array_get_mut(index)))
    }
}

impl<'a> From<&'a mut Value> for HandleMut<'a> {
    fn from(value: &'a mut Value) -> Self {
        HandleMut::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        Value::from(json!({"a": [1, 2, {"b": "3.5"}], "n": null}))
    }

    #[test]
    fn absent_is_distinct_from_null() {
        let value = sample();
        let root = Handle::new(&value);
        assert!(!root.get("n").is_absent());
        assert_eq!(root.get("n").kind(), Some(Kind::Null));
        assert!(root.get("missing").is_absent());
        assert_eq!(root.get("missing").kind(), None);
    }

    #[test]
    fn absent_coerces_like_null() {
        let value = sample();
        let missing = Handle::new(&value).get("missing").at(4).get("deeper");
        assert!(missing.is_absent());
        assert_eq!(missing.as_int(Some(9)), 0);
        assert_eq!(missing.as_string(None), "null");
        assert!(!missing.as_bool(Some(true)));
        assert_eq!(missing.to_text(), "null");
    }

    #[test]
    fn path_mixes_keys_and_indices() {
        let value = sample();
        let root = Handle::new(&value);
        assert_eq!(root.path("a.2.b").as_float(None), 3.5);
        assert_eq!(root.path("a.0").as_int(None), 1);
        assert_eq!(root.path(""), root);
        assert!(root.path("a.9").is_absent());
        assert!(root.path("a.x").is_absent());
    }

    #[test]
    fn numeric_segment_is_a_key_on_objects() {
        let value = Value::from(json!({"0": "zero"}));
        assert_eq!(Handle::new(&value).path("0").as_string(None), "zero");
    }

    #[test]
    fn mutable_chain_builds_depth_first() {
        let mut root = Value::new_object();
        {
            let mut handle = HandleMut::new(&mut root);
            handle.object_set("name", "a");
            let mut list = handle.object_new_array("list");
            list.array_append(1);
            list.array_new_object().object_set("k", true);
        }
        assert_eq!(root.to_text(), r#"{"name":"a","list":[1,{"k":true}]}"#);
    }

    #[test]
    fn mutations_through_absent_are_ignored() {
        let mut root = Value::from(vec![1]);
        HandleMut::new(&mut root)
            .get_mut("nope")
            .object_set("k", 1)
            .array_append(2);
        HandleMut::new(&mut root).at_mut(7).set("x");
        assert_eq!(root, Value::from(vec![1]));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut root = Value::from(json!({"a": [0, 0]}));
        HandleMut::new(&mut root).into_get("a").into_at(1).set(5);
        assert_eq!(root.to_text(), r#"{"a":[0,5]}"#);
    }
}
