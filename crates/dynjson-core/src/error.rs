//! Error types for document parsing, serialization and strict extraction.
//!
//! Coercion failures have their own type, [`CoerceError`](crate::coerce::CoerceError),
//! because they are absorbed into defaults rather than surfaced.

use thiserror::Error;

/// Structural errors surfaced to the caller.
#[derive(Error, Debug)]
pub enum DynJsonError {
    /// The input bytes were not well-formed JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The serializer rejected a value in the tree, e.g. a `Number` whose
    /// text is not a valid JSON number literal.
    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Strict array extraction on a value of another kind.
    #[error("expected an array, found {found}")]
    NotArray { found: &'static str },

    /// Strict object extraction on a value of another kind.
    #[error("expected an object, found {found}")]
    NotObject { found: &'static str },
}

/// Convenience alias used throughout dynjson-core.
pub type Result<T> = std::result::Result<T, DynJsonError>;
