//! Decoder for values written by PHP's `serialize()`.
//!
//! Only the scalar types and arrays are supported. Objects, references and custom
//! serialization are rejected since post metadata never contains them.

use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Clone, PartialEq, Debug)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// An ordered map, entries in serialization order.
    Array(Vec<(PhpKey, PhpValue)>),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum PhpKey {
    Int(i64),
    String(String),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum PhpDecodeError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Expected '{expected}' at byte {position}")]
    Expected { expected: char, position: usize },
    #[error("Unsupported type tag '{tag}' at byte {position}")]
    UnsupportedType { tag: char, position: usize },
    #[error("Invalid number at byte {0}")]
    InvalidNumber(usize),
    #[error("Invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
    #[error("Array key must be an int or a string, at byte {0}")]
    InvalidKey(usize),
    #[error("Trailing data at byte {0}")]
    TrailingData(usize),
    #[error("Arrays nested too deeply at byte {0}")]
    TooDeep(usize),
}

/// Deepest array nesting accepted by [`unserialize`].
pub const MAX_DEPTH: usize = 64;

impl PhpValue {
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub fn entries(&self) -> Option<&[(PhpKey, PhpValue)]> {
        match self {
            Self::Array(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up an array entry the way PHP does, where `"5"` and `5` are the same key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        self.entries()?
            .iter()
            .find(|(entry_key, _)| entry_key.matches(key))
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integers and numeric strings that fit into a `u32`.
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Int(i) => u32::try_from(*i).ok(),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl PhpKey {
    fn matches(&self, key: &str) -> bool {
        match self {
            Self::String(s) => s == key,
            Self::Int(i) => key.parse::<i64>().is_ok_and(|key| key == *i),
        }
    }
}

impl Display for PhpKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => Display::fmt(i, f),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Whether `data` looks like the output of `serialize()`.
#[must_use]
pub fn is_serialized(data: &str) -> bool {
    let data = data.trim();
    if data == "N;" {
        return true;
    }

    let bytes = data.as_bytes();
    bytes.len() >= 4
        && bytes[1] == b':'
        && matches!(
            (bytes[0], bytes[bytes.len() - 1]),
            (b's' | b'i' | b'd' | b'b', b';') | (b'a', b'}')
        )
}

/// Unserializes `data` if it looks serialized, and returns `None` for plain strings.
pub fn maybe_unserialize(data: &str) -> Result<Option<PhpValue>, PhpDecodeError> {
    if is_serialized(data) {
        unserialize(data.trim().as_bytes()).map(Some)
    } else {
        Ok(None)
    }
}

pub fn unserialize(input: &[u8]) -> Result<PhpValue, PhpDecodeError> {
    let mut decoder = Decoder {
        input,
        position: 0,
        depth: 0,
    };
    let value = decoder.value()?;

    if decoder.position == input.len() {
        Ok(value)
    } else {
        Err(PhpDecodeError::TrailingData(decoder.position))
    }
}

struct Decoder<'a> {
    input: &'a [u8],
    position: usize,
    depth: usize,
}

impl Decoder<'_> {
    fn value(&mut self) -> Result<PhpValue, PhpDecodeError> {
        let tag_position = self.position;
        let tag = self.next()?;

        if tag == b'N' {
            self.expect(b';')?;
            return Ok(PhpValue::Null);
        }

        self.expect(b':')?;
        match tag {
            b'b' => match self.number::<u8>(b';')? {
                0 => Ok(PhpValue::Bool(false)),
                1 => Ok(PhpValue::Bool(true)),
                _ => Err(PhpDecodeError::InvalidNumber(tag_position + 2)),
            },
            b'i' => self.number(b';').map(PhpValue::Int),
            b'd' => self.number(b';').map(PhpValue::Float),
            b's' => {
                let s = self.string()?;
                self.expect(b';')?;
                Ok(PhpValue::String(s))
            }
            b'a' => {
                if self.depth == MAX_DEPTH {
                    return Err(PhpDecodeError::TooDeep(tag_position));
                }
                self.depth += 1;
                let array = self.array();
                self.depth -= 1;
                array
            }
            tag => Err(PhpDecodeError::UnsupportedType {
                tag: char::from(tag),
                position: tag_position,
            }),
        }
    }

    fn array(&mut self) -> Result<PhpValue, PhpDecodeError> {
        let count: usize = self.number(b':')?;
        self.expect(b'{')?;

        // The count comes from the input; don't trust it for allocation.
        let mut entries = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let key_position = self.position;
            let key = match self.value()? {
                PhpValue::Int(i) => PhpKey::Int(i),
                PhpValue::String(s) => PhpKey::String(s),
                _ => return Err(PhpDecodeError::InvalidKey(key_position)),
            };
            let value = self.value()?;
            entries.push((key, value));
        }

        self.expect(b'}')?;
        Ok(PhpValue::Array(entries))
    }

    /// `len:"bytes"`; the length counts bytes, not characters.
    fn string(&mut self) -> Result<String, PhpDecodeError> {
        let len: usize = self.number(b':')?;
        self.expect(b'"')?;

        let start = self.position;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(PhpDecodeError::UnexpectedEnd)?;
        let s = std::str::from_utf8(&self.input[start..end])
            .map_err(|_| PhpDecodeError::InvalidUtf8(start))?;
        self.position = end;

        self.expect(b'"')?;
        Ok(s.to_owned())
    }

    /// Reads up to (and consumes) `terminator` and parses what came before it.
    fn number<T: std::str::FromStr>(&mut self, terminator: u8) -> Result<T, PhpDecodeError> {
        let start = self.position;
        let len = self.input[start..]
            .iter()
            .position(|&b| b == terminator)
            .ok_or(PhpDecodeError::UnexpectedEnd)?;
        self.position = start + len + 1;

        std::str::from_utf8(&self.input[start..start + len])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or(PhpDecodeError::InvalidNumber(start))
    }

    fn next(&mut self) -> Result<u8, PhpDecodeError> {
        let byte = *self
            .input
            .get(self.position)
            .ok_or(PhpDecodeError::UnexpectedEnd)?;
        self.position += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> Result<(), PhpDecodeError> {
        let position = self.position;
        if self.next()? == expected {
            Ok(())
        } else {
            Err(PhpDecodeError::Expected {
                expected: char::from(expected),
                position,
            })
        }
    }
}
