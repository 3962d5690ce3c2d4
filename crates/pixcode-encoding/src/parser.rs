//! Cursor-based reader for the tag-length-value wire primitive.

use std::str;

use crate::error::DecodeError;
use crate::field::Tag;

/// A borrowed data object produced by [`TlvParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    pub tag: Tag,
    pub value: &'a str,
}

impl<'a> RawField<'a> {
    /// Reads this field's value as a nested template.
    pub fn subfields(&self) -> Result<Vec<RawField<'a>>, DecodeError> {
        parse_fields(self.value)
    }
}

/// Steps through a payload one data object at a time.
///
/// The cursor advances only on success; after an error it stays on the
/// offending field so [`TlvParser::position`] points at it.
#[derive(Debug)]
pub struct TlvParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> TlvParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Byte offset of the next unread field.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Reads the next field, or `None` at end of input.
    pub fn next_field(&mut self) -> Result<Option<RawField<'a>>, DecodeError> {
        let bytes = self.input.as_bytes();
        let remaining = bytes.len() - self.position;
        if remaining == 0 {
            return Ok(None);
        }
        if remaining < 4 {
            return Err(DecodeError::TruncatedHeader {
                position: self.position,
            });
        }
        let tag = two_digits(&bytes[self.position..]).ok_or(DecodeError::InvalidTag {
            position: self.position,
        })?;
        let declared =
            two_digits(&bytes[self.position + 2..]).ok_or(DecodeError::InvalidLength {
                position: self.position + 2,
            })? as usize;
        if remaining - 4 < declared {
            return Err(DecodeError::LengthOverrun {
                position: self.position,
                declared,
                remaining: remaining - 4,
            });
        }
        let start = self.position + 4;
        let value = str::from_utf8(&bytes[start..start + declared])
            .map_err(|_| DecodeError::InvalidValue { position: start })?;
        self.position = start + declared;
        Ok(Some(RawField {
            tag: Tag::new(tag).expect("two digits are always in range"),
            value,
        }))
    }
}

/// Reads every field in `input`, in order.
pub fn parse_fields(input: &str) -> Result<Vec<RawField<'_>>, DecodeError> {
    let mut parser = TlvParser::new(input);
    let mut fields = Vec::new();
    while let Some(field) = parser.next_field()? {
        fields.push(field);
    }
    Ok(fields)
}

fn two_digits(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [a, b, ..] if a.is_ascii_digit() && b.is_ascii_digit() => Some((a - b'0') * 10 + (b - b'0')),
        _ => None,
    }
}
