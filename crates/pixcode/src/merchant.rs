//! Validated merchant attributes: display name, city, postal code.
//!
//! Readers render these on the payment confirmation screen, so the limits
//! are the standard's display limits, checked in bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub(crate) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Merchant display name, 1 to 25 printable ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MerchantName(String);

impl MerchantName {
    pub const MAX_LEN: usize = 25;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.len() > Self::MAX_LEN || !is_printable_ascii(&value) {
            return Err(ValidationError::InvalidMerchantName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Merchant city, 1 to 15 printable ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MerchantCity(String);

impl MerchantCity {
    pub const MAX_LEN: usize = 15;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.len() > Self::MAX_LEN || !is_printable_ascii(&value) {
            return Err(ValidationError::InvalidMerchantCity);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Merchant postal code, 1 to 10 ASCII alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    pub const MAX_LEN: usize = 10;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty()
            || value.len() > Self::MAX_LEN
            || !value.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidPostalCode);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_conversions {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_newtype_conversions!(MerchantName);
string_newtype_conversions!(MerchantCity);
string_newtype_conversions!(PostalCode);

/// The merchant block of a charge: who is paid and where they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub name: MerchantName,
    pub city: MerchantCity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<PostalCode>,
}

impl Merchant {
    pub fn new(name: MerchantName, city: MerchantCity) -> Self {
        Self {
            name,
            city,
            postal_code: None,
        }
    }

    pub fn with_postal_code(mut self, postal_code: PostalCode) -> Self {
        self.postal_code = Some(postal_code);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_up_to_twenty_five_bytes() {
        assert!(MerchantName::new("WOLK STORE").is_ok());
        assert!(MerchantName::new("A").is_ok());
        assert!(MerchantName::new("X".repeat(25)).is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        assert_eq!(
            MerchantName::new(""),
            Err(ValidationError::InvalidMerchantName)
        );
        assert_eq!(
            MerchantName::new("X".repeat(26)),
            Err(ValidationError::InvalidMerchantName)
        );
    }

    #[test]
    fn rejects_names_outside_printable_ascii() {
        assert_eq!(
            MerchantName::new("Padaria S\u{e3}o Jorge"),
            Err(ValidationError::InvalidMerchantName)
        );
        assert_eq!(
            MerchantName::new("TAB\tSTORE"),
            Err(ValidationError::InvalidMerchantName)
        );
    }

    #[test]
    fn city_limit_is_fifteen_bytes() {
        assert!(MerchantCity::new("SAO PAULO").is_ok());
        assert!(MerchantCity::new("X".repeat(15)).is_ok());
        assert_eq!(
            MerchantCity::new("X".repeat(16)),
            Err(ValidationError::InvalidMerchantCity)
        );
    }

    #[test]
    fn postal_code_is_alphanumeric_up_to_ten() {
        assert!(PostalCode::new("30130010").is_ok());
        assert!(PostalCode::new("X".repeat(10)).is_ok());
        assert_eq!(
            PostalCode::new("X".repeat(11)),
            Err(ValidationError::InvalidPostalCode)
        );
        assert_eq!(
            PostalCode::new("30130-010"),
            Err(ValidationError::InvalidPostalCode)
        );
        assert_eq!(PostalCode::new(""), Err(ValidationError::InvalidPostalCode));
    }
}
