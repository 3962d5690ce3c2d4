use std::fmt;

use crate::error::EncodeError;

/// Largest value, in bytes, that the two-digit length prefix can carry.
pub const MAX_VALUE_LEN: usize = 99;

/// A data object identifier in the `00`-`99` range.
///
/// Tags always render as exactly two digits, so `Tag(7)` writes as `07`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u8);

impl Tag {
    /// Highest identifier expressible in two digits.
    pub const MAX: u8 = 99;

    pub fn new(value: u8) -> Result<Self, EncodeError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(EncodeError::TagOutOfRange(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A single tag-length-value data object.
///
/// The encoded form is the two-digit tag, the two-digit value length in
/// bytes, then the value itself. Values that do not fit the length prefix
/// are rejected at construction, never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    tag: Tag,
    value: String,
}

impl Field {
    pub fn new(tag: Tag, value: impl Into<String>) -> Result<Self, EncodeError> {
        let value = value.into();
        if value.len() > MAX_VALUE_LEN {
            return Err(EncodeError::ValueTooLong {
                tag,
                len: value.len(),
            });
        }
        Ok(Self { tag, value })
    }

    /// Wraps an already composed template as the value of `tag`.
    pub fn template(tag: Tag, template: &Template) -> Result<Self, EncodeError> {
        Self::new(tag, template.to_value())
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Size of the encoded form: four header characters plus the value.
    pub fn encoded_len(&self) -> usize {
        4 + self.value.len()
    }

    /// Appends the encoded form of this field to `out`.
    pub fn write(&self, out: &mut String) {
        // the length fits in two digits by construction
        out.push_str(&format!("{}{:02}", self.tag, self.value.len()));
        out.push_str(&self.value);
    }

    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        self.write(&mut out);
        out
    }
}

/// An ordered run of fields whose concatenated encoding becomes the value
/// of an enclosing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    fields: Vec<Field>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Appends every member field to `out`, in insertion order.
    pub fn write(&self, out: &mut String) {
        for field in &self.fields {
            field.write(out);
        }
    }

    pub fn to_value(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }
}

impl FromIterator<Field> for Template {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
