//! Byte-level parsing into a [`Value`] tree.
//!
//! Parsing runs in two passes over the input slice. serde_json first validates
//! the whole document (grammar, escapes, trailing characters) with its recursion
//! limit lifted and `serde_stacker` growing the stack on demand. A builder then
//! walks the validated bytes with an explicit stack, so nesting depth never
//! touches the call stack. Number tokens are copied out of the input verbatim,
//! which keeps spellings such as `1E5` or `-0.0` exactly as written. Strings are
//! decoded by serde_json.

use crate::error::{DynJsonError, Result};
use crate::map::Map;
use crate::value::Value;
use serde::de::{Deserialize, IgnoredAny};

/// Deepest container nesting accepted by [`parse_slice`].
pub const MAX_DEPTH: usize = 10_000;

/// Parse a complete JSON document.
pub(crate) fn parse_slice(bytes: &[u8]) -> Result<Value> {
    validate(bytes)?;
    Builder { bytes, pos: 0 }.build()
}

fn validate(bytes: &[u8]) -> Result<()> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let stacked = serde_stacker::Deserializer::new(&mut de);
    IgnoredAny::deserialize(stacked).map_err(DynJsonError::Parse)?;
    de.end().map_err(DynJsonError::Parse)
}

fn parse_error(msg: impl std::fmt::Display) -> DynJsonError {
    DynJsonError::Parse(<serde_json::Error as serde::de::Error>::custom(msg))
}

/// A container still being filled.
enum Frame {
    Array(Vec<Value>),
    /// The object so far and the key awaiting its value.
    Object(Map, String),
}

impl Frame {
    fn into_value(self) -> Value {
        match self {
            Frame::Array(items) => Value::Array(items),
            Frame::Object(map, _) => Value::Object(map),
        }
    }
}

struct Builder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Builder<'_> {
    fn build(mut self) -> Result<Value> {
        let mut stack: Vec<Frame> = Vec::new();
        loop {
            if stack.len() > MAX_DEPTH {
                return Err(parse_error(format!(
                    "nesting deeper than {MAX_DEPTH} levels at byte {}",
                    self.pos
                )));
            }
            self.skip_whitespace();
            let mut value = match self.peek()? {
                b'[' => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek()? == b']' {
                        self.pos += 1;
                        Value::new_array()
                    } else {
                        stack.push(Frame::Array(Vec::new()));
                        continue;
                    }
                }
                b'{' => {
                    self.pos += 1;
                    self.skip_whitespace();
                    if self.peek()? == b'}' {
                        self.pos += 1;
                        Value::new_object()
                    } else {
                        let key = self.key()?;
                        stack.push(Frame::Object(Map::new(), key));
                        continue;
                    }
                }
                b'"' => Value::String(self.string()?),
                b't' => self.literal("true", Value::Bool(true))?,
                b'f' => self.literal("false", Value::Bool(false))?,
                b'n' => self.literal("null", Value::Null)?,
                _ => Value::Number(self.number()?),
            };

            // Attach the finished value, closing every container it completes.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return Ok(value);
                };
                let closed = match frame {
                    Frame::Array(items) => {
                        items.push(value);
                        self.after_element(b']')?
                    }
                    Frame::Object(map, key) => {
                        map.insert(std::mem::take(key), value);
                        let closed = self.after_element(b'}')?;
                        if !closed {
                            *key = self.key()?;
                        }
                        closed
                    }
                };
                if !closed {
                    break;
                }
                value = match stack.pop() {
                    Some(frame) => frame.into_value(),
                    None => return Err(parse_error("unbalanced container")),
                };
            }
        }
    }

    fn peek(&self) -> Result<u8> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| parse_error(format!("unexpected end of input at byte {}", self.pos)))
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek()? != byte {
            return Err(parse_error(format!(
                "expected {:?} at byte {}",
                char::from(byte),
                self.pos
            )));
        }
        self.pos += 1;
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.bytes.get(self.pos) {
            self.pos += 1;
        }
    }

    /// After an element: `true` if `close` ended the container, `false` on a comma.
    fn after_element(&mut self, close: u8) -> Result<bool> {
        self.skip_whitespace();
        match self.peek()? {
            b',' => {
                self.pos += 1;
                Ok(false)
            }
            b if b == close => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(parse_error(format!(
                "expected ',' or {:?} at byte {}",
                char::from(close),
                self.pos
            ))),
        }
    }

    /// An object key and its `:` separator.
    fn key(&mut self) -> Result<String> {
        self.skip_whitespace();
        let key = self.string()?;
        self.skip_whitespace();
        self.expect(b':')?;
        Ok(key)
    }

    fn literal(&mut self, word: &str, value: Value) -> Result<Value> {
        let end = self.pos + word.len();
        if self.bytes.get(self.pos..end) != Some(word.as_bytes()) {
            return Err(parse_error(format!("expected `{word}` at byte {}", self.pos)));
        }
        self.pos = end;
        Ok(value)
    }

    fn number(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.bytes.get(self.pos) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(parse_error(format!("expected a value at byte {start}")));
        }
        let token = &self.bytes[start..self.pos];
        std::str::from_utf8(token)
            .map(str::to_owned)
            .map_err(parse_error)
    }

    fn string(&mut self) -> Result<String> {
        let start = self.pos;
        self.expect(b'"')?;
        let mut escaped = false;
        loop {
            match self.peek()? {
                b'"' => break,
                b'\\' => {
                    escaped = true;
                    self.pos += 2;
                }
                _ => self.pos += 1,
            }
        }
        self.pos += 1;
        if escaped {
            serde_json::from_slice(&self.bytes[start..self.pos]).map_err(DynJsonError::Parse)
        } else {
            std::str::from_utf8(&self.bytes[start + 1..self.pos - 1])
                .map(str::to_owned)
                .map_err(parse_error)
        }
    }
}
