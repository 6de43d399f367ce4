//! # dynjson-core
//!
//! A dynamic JSON value tree for reading loosely structured JSON without defining
//! a type per shape.
//!
//! Parse bytes into a [`Document`], walk it by key or index without checking each
//! step, and coerce whatever you reach into a `bool`, `i64`, `f64` or `String`,
//! giving a default once at the end. Numbers stay as their original decimal text
//! until a coercion asks for a machine number, so nothing is lost to float
//! rounding on the way through.
//!
//! ## Quick start
//!
//! ```rust
//! use dynjson_core::Document;
//!
//! let doc = Document::parse(br#"{"a":[1,2,{"b":"3.5"}]}"#).unwrap();
//! let b = doc.handle().get("a").at(2).get("b");
//! assert_eq!(b.as_float(None), 3.5);
//! assert_eq!(b.as_int(None), 0); // not an integer: falls back to zero
//! assert_eq!(doc.handle().get("missing").as_int(Some(7)), 0); // absent reads as null
//!
//! let mut built = Document::new_object();
//! built.object_set("name", "a");
//! built.handle_mut().object_new_array("tags").array_append("x").array_append("y");
//! assert_eq!(built.to_text(), r#"{"name":"a","tags":["x","y"]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the [`Value`] tree and normalization from `serde_json::Value`
//! - [`map`]: insertion-ordered object entries
//! - [`navigate`]: keyed/indexed access and in-place mutation on [`Value`]
//! - [`handle`]: chainable [`Handle`]/[`HandleMut`] with absent positions
//! - [`coerce`]: the primitive conversion tables
//! - [`document`]: parse and serialize entry points
//! - [`parse`]: byte-level parsing that keeps number literals verbatim
//! - [`error`]: structural error types

pub mod coerce;
pub mod document;
pub mod error;
pub mod handle;
pub mod map;
pub mod navigate;
pub mod parse;
pub mod value;

pub use coerce::{CoerceError, Target};
pub use document::Document;
pub use error::{DynJsonError, Result};
pub use handle::{Handle, HandleMut};
pub use map::Map;
pub use value::{Kind, Value};
