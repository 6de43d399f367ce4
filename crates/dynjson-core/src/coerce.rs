//! Best-effort conversion of any [`Value`] to a primitive.
//!
//! Each target has a total conversion table over the value kinds:
//!
//! | source        | bool               | i64                 | f64            | String                 |
//! |---------------|--------------------|---------------------|----------------|------------------------|
//! | `Null`        | `false`            | `0`                 | `0.0`          | `"null"`               |
//! | `Bool`        | identity           | `1`/`0`             | `1.0`/`0.0`    | `"true"`/`"false"`     |
//! | `Number` text | integer text != 0  | integer text        | float text     | text unchanged         |
//! | `String`      | boolean literal    | base-10 integer     | float          | identity               |
//! | `Int`/`Uint`  | `!= 0`             | checked             | widened        | decimal                |
//! | `Float`       | `!= 0.0`           | truncated           | identity       | 18 fractional digits   |
//!
//! Float text that overflows `f64` is out of range. Non-finite floats render as
//! `NaN`, `+Inf` and `-Inf`.
//! | `Array`/`Object` | unsupported     | unsupported         | unsupported    | unsupported            |
//!
//! The `coerce_*` functions report failures as [`CoerceError`]. The `as_*` methods on
//! [`Value`] absorb the failure and return the caller's default, or the target's
//! zero value when no default is given.

use crate::value::{Kind, Value};
use std::fmt;
use thiserror::Error;

/// The primitive a coercion was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Bool => "bool",
            Target::Int => "int64",
            Target::Float => "float64",
            Target::String => "string",
        })
    }
}

/// Why a value could not be converted to the requested primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    /// The source kind has no conversion to the target (arrays and objects).
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: Kind, to: Target },

    /// String or number text did not parse as the target.
    #[error("cannot parse {text:?} as {to}")]
    InvalidText { text: String, to: Target },

    /// A machine number does not fit the target.
    #[error("value out of range for {to}")]
    OutOfRange { to: Target },
}

/// Text rendering of `Value::Null` under string coercion.
pub const NULL_TEXT: &str = "null";

/// Fractional digits used when rendering a float as a string.
pub const FLOAT_TEXT_PRECISION: usize = 18;

pub fn coerce_bool(value: &Value) -> Result<bool, CoerceError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(text) => parse_i64(text, Target::Bool).map(|n| n != 0),
        Value::String(text) => parse_bool(text),
        Value::Int(n) => Ok(*n != 0),
        Value::Uint(n) => Ok(*n != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::Array(_) | Value::Object(_) => Err(unsupported(value, Target::Bool)),
    }
}

pub fn coerce_i64(value: &Value) -> Result<i64, CoerceError> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(text) | Value::String(text) => parse_i64(text, Target::Int),
        Value::Int(n) => Ok(*n),
        Value::Uint(n) => {
            i64::try_from(*n).map_err(|_| CoerceError::OutOfRange { to: Target::Int })
        }
        // Truncates toward zero; saturates at the i64 bounds and maps NaN to 0.
        Value::Float(f) => Ok(*f as i64),
        Value::Array(_) | Value::Object(_) => Err(unsupported(value, Target::Int)),
    }
}

pub fn coerce_f64(value: &Value) -> Result<f64, CoerceError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(text) | Value::String(text) => parse_f64(text),
        Value::Int(n) => Ok(*n as f64),
        Value::Uint(n) => Ok(*n as f64),
        Value::Float(f) => Ok(*f),
        Value::Array(_) | Value::Object(_) => Err(unsupported(value, Target::Float)),
    }
}

pub fn coerce_string(value: &Value) -> Result<String, CoerceError> {
    match value {
        Value::Null => Ok(NULL_TEXT.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(text) | Value::String(text) => Ok(text.clone()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Uint(n) => Ok(n.to_string()),
        Value::Float(f) => Ok(float_text(*f)),
        Value::Array(_) | Value::Object(_) => Err(unsupported(value, Target::String)),
    }
}

fn unsupported(value: &Value, to: Target) -> CoerceError {
    CoerceError::Unsupported {
        from: value.kind(),
        to,
    }
}

fn parse_i64(text: &str, to: Target) -> Result<i64, CoerceError> {
    text.parse::<i64>().map_err(|_| CoerceError::InvalidText {
        text: text.to_string(),
        to,
    })
}

/// Parse float text. Digits that overflow to infinity are out of range; the
/// spelled-out `inf`/`NaN` forms are accepted as written.
fn parse_f64(text: &str) -> Result<f64, CoerceError> {
    let parsed = text.parse::<f64>().map_err(|_| CoerceError::InvalidText {
        text: text.to_string(),
        to: Target::Float,
    })?;
    if parsed.is_infinite() && text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(CoerceError::OutOfRange { to: Target::Float });
    }
    Ok(parsed)
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "+Inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{f:.prec$}", prec = FLOAT_TEXT_PRECISION)
    }
}

fn parse_bool(text: &str) -> Result<bool, CoerceError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::InvalidText {
            text: text.to_string(),
            to: Target::Bool,
        }),
    }
}

/// Resolve a coercion result: the converted value, else `default`, else `T::default()`.
fn or_default<T: Default>(value: &Value, result: Result<T, CoerceError>, default: Option<T>) -> T {
    match result {
        Ok(converted) => converted,
        Err(err) => {
            tracing::debug!(
                kind = %value.kind(),
                error = %err,
                has_default = default.is_some(),
                "coercion failed, falling back"
            );
            default.unwrap_or_default()
        }
    }
}

impl Value {
    /// Coerce to `bool`, falling back to `default` (or `false`).
    pub fn as_bool(&self, default: Option<bool>) -> bool {
        or_default(self, coerce_bool(self), default)
    }

    /// Coerce to `i64`, falling back to `default` (or `0`).
    pub fn as_int(&self, default: Option<i64>) -> i64 {
        or_default(self, coerce_i64(self), default)
    }

    /// Coerce to `f64`, falling back to `default` (or `0.0`).
    pub fn as_float(&self, default: Option<f64>) -> f64 {
        or_default(self, coerce_f64(self), default)
    }

    /// Coerce to `String`, falling back to `default` (or the empty string).
    ///
    /// `Null` always converts to `"null"`, so an absent value never reads as `""`.
    pub fn as_string(&self, default: Option<&str>) -> String {
        match coerce_string(self) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(kind = %self.kind(), error = %err, "coercion failed, falling back");
                default.map(str::to_string).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Value {
        Value::Number(text.to_string())
    }

    #[test]
    fn number_text_to_int_requires_integer_literal() {
        assert_eq!(coerce_i64(&number("-42")), Ok(-42));
        assert_eq!(
            coerce_i64(&number("3.5")),
            Err(CoerceError::InvalidText {
                text: "3.5".into(),
                to: Target::Int
            })
        );
        assert!(coerce_i64(&number("1e3")).is_err());
        assert!(coerce_i64(&number("9223372036854775808")).is_err());
    }

    #[test]
    fn number_text_to_bool_goes_through_integer() {
        assert_eq!(coerce_bool(&number("0")), Ok(false));
        assert_eq!(coerce_bool(&number("17")), Ok(true));
        assert!(coerce_bool(&number("0.5")).is_err());
    }

    #[test]
    fn string_bool_literals() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(coerce_bool(&Value::from(text)), Ok(true), "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(coerce_bool(&Value::from(text)), Ok(false), "{text}");
        }
        for text in ["yes", "", " true", "tRUE"] {
            assert!(coerce_bool(&Value::from(text)).is_err(), "{text}");
        }
    }

    #[test]
    fn uint_beyond_i64_is_out_of_range() {
        assert_eq!(
            coerce_i64(&Value::Uint(u64::MAX)),
            Err(CoerceError::OutOfRange { to: Target::Int })
        );
        assert_eq!(Value::Uint(u64::MAX).as_int(Some(-1)), -1);
        assert_eq!(coerce_i64(&Value::Uint(5)), Ok(5));
    }

    #[test]
    fn float_to_int_truncates() {
        assert_eq!(coerce_i64(&Value::Float(3.9)), Ok(3));
        assert_eq!(coerce_i64(&Value::Float(-3.9)), Ok(-3));
        assert_eq!(coerce_i64(&Value::Float(f64::NAN)), Ok(0));
        assert_eq!(coerce_i64(&Value::Float(1e300)), Ok(i64::MAX));
    }

    #[test]
    fn float_to_string_uses_fixed_point() {
        assert_eq!(
            coerce_string(&Value::Float(1.5)).unwrap(),
            "1.500000000000000000"
        );
        assert_eq!(
            coerce_string(&Value::Float(1e20)).unwrap(),
            "100000000000000000000.000000000000000000"
        );
        assert_eq!(
            coerce_string(&Value::Float(0.1)).unwrap(),
            "0.100000000000000006"
        );
    }

    #[test]
    fn overflowing_float_text_is_out_of_range() {
        for text in ["1e400", "-1e400", "1797693134862315708145274237317043567981e270"] {
            assert_eq!(
                coerce_f64(&Value::from(text)),
                Err(CoerceError::OutOfRange { to: Target::Float }),
                "{text}"
            );
            assert_eq!(number(text).as_float(Some(1.0)), 1.0, "{text}");
        }
        assert_eq!(Value::from("1e400").as_float(None), 0.0);
        assert_eq!(coerce_f64(&Value::from("1e-400")), Ok(0.0));
    }

    #[test]
    fn spelled_out_infinity_is_accepted() {
        assert_eq!(coerce_f64(&Value::from("+Inf")), Ok(f64::INFINITY));
        assert_eq!(coerce_f64(&Value::from("-inf")), Ok(f64::NEG_INFINITY));
        assert!(coerce_f64(&Value::from("NaN")).is_ok_and(f64::is_nan));
    }

    #[test]
    fn non_finite_floats_render_like_their_literals() {
        assert_eq!(coerce_string(&Value::Float(f64::INFINITY)).unwrap(), "+Inf");
        assert_eq!(Value::Float(f64::NEG_INFINITY).as_string(None), "-Inf");
        assert_eq!(Value::Float(f64::NAN).as_string(None), "NaN");
    }

    #[test]
    fn containers_are_unsupported() {
        let array = Value::new_array();
        assert_eq!(
            coerce_f64(&array),
            Err(CoerceError::Unsupported {
                from: Kind::Array,
                to: Target::Float
            })
        );
        assert_eq!(
            coerce_string(&Value::new_object()).unwrap_err().to_string(),
            "cannot convert object to string"
        );
    }

    #[test]
    fn defaults_only_apply_on_failure() {
        assert_eq!(Value::Null.as_int(Some(42)), 0);
        assert_eq!(Value::new_array().as_int(Some(42)), 42);
        assert_eq!(Value::new_array().as_int(None), 0);
        assert_eq!(Value::Null.as_string(Some("x")), "null");
        assert_eq!(Value::new_object().as_string(None), "");
        assert_eq!(Value::new_object().as_string(Some("x")), "x");
        assert_eq!(Value::from("nan?").as_float(Some(2.5)), 2.5);
    }
}
