//! Navigation and in-place mutation of a [`Value`] tree.
//!
//! Array operations only act on `Value::Array` and object operations only act on
//! `Value::Object`. Called on any other kind they do nothing and report absence
//! (`None`, `false`, or an unchanged receiver); they never panic. Strict
//! extraction (`try_array`, `try_object`) is the exception and returns an error.

use crate::error::{DynJsonError, Result};
use crate::map::Map;
use crate::value::Value;
use std::sync::LazyLock;

static EMPTY_MAP: LazyLock<Map> = LazyLock::new(Map::new);

impl Value {
    // -- arrays -------------------------------------------------------------

    /// Append `item` to the end of an array. No-op on any other kind.
    pub fn array_append(&mut self, item: impl Into<Value>) -> &mut Self {
        match self {
            Value::Array(items) => items.push(item.into()),
            ref other => tracing::trace!(kind = %other.kind(), "array_append on non-array ignored"),
        }
        self
    }

    /// The element at `index`, if this is an array and the index is in range.
    pub fn array_get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn array_get_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Array(items) => items.get_mut(index),
            _ => None,
        }
    }

    /// The last element of a non-empty array.
    pub fn array_last(&self) -> Option<&Value> {
        match self {
            Value::Array(items) => items.last(),
            _ => None,
        }
    }

    /// Append an empty array and return it for further building.
    pub fn array_new_array(&mut self) -> Option<&mut Value> {
        self.array_push_and_get(Value::new_array())
    }

    /// Append an empty object and return it for further building.
    pub fn array_new_object(&mut self) -> Option<&mut Value> {
        self.array_push_and_get(Value::new_object())
    }

    fn array_push_and_get(&mut self, item: Value) -> Option<&mut Value> {
        match self {
            Value::Array(items) => {
                items.push(item);
                items.last_mut()
            }
            other => {
                tracing::trace!(kind = %other.kind(), "nested insert on non-array ignored");
                None
            }
        }
    }

    // -- objects ------------------------------------------------------------

    /// Insert or overwrite `key` in an object. No-op on any other kind.
    pub fn object_set(&mut self, key: impl Into<String>, item: impl Into<Value>) -> &mut Self {
        match self {
            Value::Object(map) => {
                map.insert(key, item.into());
            }
            ref other => tracing::trace!(kind = %other.kind(), "object_set on non-object ignored"),
        }
        self
    }

    /// The entry under `key`, if this is an object holding it.
    pub fn object_get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn object_get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// True iff this is an object and `key` is present (even if its value is null).
    pub fn exists(&self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Set `key` to an empty array and return it for further building.
    pub fn object_new_array(&mut self, key: impl Into<String>) -> Option<&mut Value> {
        self.object_set_and_get(key, Value::new_array())
    }

    /// Set `key` to an empty object and return it for further building.
    pub fn object_new_object(&mut self, key: impl Into<String>) -> Option<&mut Value> {
        self.object_set_and_get(key, Value::new_object())
    }

    fn object_set_and_get(&mut self, key: impl Into<String>, item: Value) -> Option<&mut Value> {
        match self {
            Value::Object(map) => Some(map.insert_and_get(key, item)),
            other => {
                tracing::trace!(kind = %other.kind(), "nested insert on non-object ignored");
                None
            }
        }
    }

    // -- extraction ---------------------------------------------------------

    /// The elements of an array, or [`DynJsonError::NotArray`].
    pub fn try_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(DynJsonError::NotArray {
                found: other.kind().name(),
            }),
        }
    }

    pub fn try_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(DynJsonError::NotArray {
                found: other.kind().name(),
            }),
        }
    }

    /// The entries of an object, or [`DynJsonError::NotObject`].
    pub fn try_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(DynJsonError::NotObject {
                found: other.kind().name(),
            }),
        }
    }

    pub fn try_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(DynJsonError::NotObject {
                found: other.kind().name(),
            }),
        }
    }

    /// The elements of an array; otherwise `default`, or an empty slice.
    pub fn as_array<'a>(&'a self, default: Option<&'a [Value]>) -> &'a [Value] {
        match self {
            Value::Array(items) => items.as_slice(),
            _ => default.unwrap_or(&[]),
        }
    }

    /// The entries of an object; otherwise `default`, or an empty map.
    pub fn as_object<'a>(&'a self, default: Option<&'a Map>) -> &'a Map {
        match self {
            Value::Object(map) => map,
            _ => default.unwrap_or(&*EMPTY_MAP),
        }
    }
}
