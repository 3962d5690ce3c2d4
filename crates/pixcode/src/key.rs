use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest key the registry issues, in bytes. Also what keeps the merchant
/// account template within its length prefix.
pub const MAX_KEY_LEN: usize = 77;

/// The shape of a recipient key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Cpf,
    Cnpj,
    Phone,
    Email,
    Evp,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Cpf => "CPF",
            KeyKind::Cnpj => "CNPJ",
            KeyKind::Phone => "phone",
            KeyKind::Email => "email",
            KeyKind::Evp => "random",
        };
        f.write_str(name)
    }
}

/// A validated recipient key, carried verbatim in the merchant account
/// template.
///
/// Construction checks shape only: a CPF is eleven digits, not necessarily
/// a registered one. Whether the key resolves to an account is the
/// payment rail's business, not the code's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PixKey {
    kind: KeyKind,
    value: String,
}

impl PixKey {
    /// An eleven-digit natural person registration number.
    pub fn cpf(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::typed(KeyKind::Cpf, value.into())
    }

    /// A fourteen-digit company registration number.
    pub fn cnpj(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::typed(KeyKind::Cnpj, value.into())
    }

    /// An E.164 phone number, `+` followed by up to fifteen digits.
    pub fn phone(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::typed(KeyKind::Phone, value.into())
    }

    /// An e-mail address.
    pub fn email(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::typed(KeyKind::Email, value.into())
    }

    /// A registry-generated random key: a lowercase hyphenated UUID.
    pub fn evp(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::typed(KeyKind::Evp, value.into())
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    fn typed(kind: KeyKind, value: String) -> Result<Self, ValidationError> {
        if is_valid(kind, &value) {
            Ok(Self { kind, value })
        } else {
            Err(ValidationError::MalformedKey { kind })
        }
    }
}

impl fmt::Display for PixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Classifies and validates a key from its text alone.
///
/// The shapes are disjoint, so classification never guesses: `+` means
/// phone, `@` means e-mail, eleven digits CPF, fourteen digits CNPJ, and
/// thirty-six characters a random key.
impl FromStr for PixKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = classify(s).ok_or(ValidationError::UnrecognizedKey)?;
        PixKey::typed(kind, s.to_string())
    }
}

impl TryFrom<String> for PixKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PixKey> for String {
    fn from(key: PixKey) -> Self {
        key.value
    }
}

fn classify(s: &str) -> Option<KeyKind> {
    if s.starts_with('+') {
        Some(KeyKind::Phone)
    } else if s.contains('@') {
        Some(KeyKind::Email)
    } else if s.len() == 11 && all_digits(s) {
        Some(KeyKind::Cpf)
    } else if s.len() == 14 && all_digits(s) {
        Some(KeyKind::Cnpj)
    } else if s.len() == 36 {
        Some(KeyKind::Evp)
    } else {
        None
    }
}

fn is_valid(kind: KeyKind, value: &str) -> bool {
    if value.len() > MAX_KEY_LEN || !value.is_ascii() {
        return false;
    }
    match kind {
        KeyKind::Cpf => value.len() == 11 && all_digits(value),
        KeyKind::Cnpj => value.len() == 14 && all_digits(value),
        KeyKind::Phone => is_e164(value),
        KeyKind::Email => is_email(value),
        KeyKind::Evp => is_uuid(value),
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_e164(s: &str) -> bool {
    match s.strip_prefix('+') {
        Some(digits) => {
            (2..=15).contains(&digits.len()) && all_digits(digits) && !digits.starts_with('0')
        }
        None => false,
    }
}

fn is_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !s.contains(' ')
        }
        _ => false,
    }
}

fn is_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_key_shape() {
        assert!(PixKey::cpf("11122233344").is_ok());
        assert!(PixKey::cnpj("11222333000181").is_ok());
        assert!(PixKey::phone("+5511998765432").is_ok());
        assert!(PixKey::email("fulano@example.com").is_ok());
        assert!(PixKey::evp("123e4567-e89b-12d3-a456-426614174000").is_ok());
    }

    #[test]
    fn classifies_from_text() {
        assert_eq!("11122233344".parse::<PixKey>().unwrap().kind(), KeyKind::Cpf);
        assert_eq!(
            "11222333000181".parse::<PixKey>().unwrap().kind(),
            KeyKind::Cnpj
        );
        assert_eq!(
            "+5511998765432".parse::<PixKey>().unwrap().kind(),
            KeyKind::Phone
        );
        assert_eq!(
            "fulano@example.com".parse::<PixKey>().unwrap().kind(),
            KeyKind::Email
        );
        assert_eq!(
            "123e4567-e89b-12d3-a456-426614174000".parse::<PixKey>().unwrap().kind(),
            KeyKind::Evp
        );
    }

    #[test]
    fn rejects_cpf_with_wrong_length_or_charset() {
        assert!(PixKey::cpf("1112223334").is_err());
        assert!(PixKey::cpf("111222333445").is_err());
        assert!(PixKey::cpf("1112223334a").is_err());
    }

    #[test]
    fn rejects_phones_outside_e164() {
        assert!(PixKey::phone("5511998765432").is_err());
        assert!(PixKey::phone("+0511998765432").is_err());
        assert!(PixKey::phone("+").is_err());
        assert!(PixKey::phone("+5").is_err());
        assert!(PixKey::phone("+551199876543210000").is_err());
        assert!(PixKey::phone("+55 11 99876 5432").is_err());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(PixKey::email("fulano").is_err());
        assert!(PixKey::email("@example.com").is_err());
        assert!(PixKey::email("fulano@").is_err());
        assert!(PixKey::email("fu lano@example.com").is_err());
        assert!(PixKey::email("fulano@exa@mple.com").is_err());
    }

    #[test]
    fn rejects_uppercase_or_unhyphenated_random_keys() {
        assert!(PixKey::evp("123E4567-E89B-12D3-A456-426614174000").is_err());
        assert!(PixKey::evp("123e4567e89b12d3a456426614174000").is_err());
        assert!(PixKey::evp("123e4567-e89b-12d3-a456-42661417400g").is_err());
    }

    #[test]
    fn rejects_keys_over_the_registry_limit() {
        // "@example.com" is 12 bytes, so 65 local bytes hit the 77 limit
        let local = "x".repeat(65);
        assert!(PixKey::email(format!("{local}@example.com")).is_ok());
        let local = "x".repeat(66);
        assert_eq!(
            PixKey::email(format!("{local}@example.com")),
            Err(ValidationError::MalformedKey {
                kind: KeyKind::Email
            })
        );
    }

    #[test]
    fn unclassifiable_text_is_reported_as_such() {
        assert_eq!(
            "not-a-key".parse::<PixKey>(),
            Err(ValidationError::UnrecognizedKey)
        );
    }

    #[test]
    fn misshapen_text_of_a_known_kind_names_the_kind() {
        // classified as phone by the leading +, then fails the digit check
        assert_eq!(
            "+55-11-99876".parse::<PixKey>(),
            Err(ValidationError::MalformedKey {
                kind: KeyKind::Phone
            })
        );
    }

    #[test]
    fn serde_string_form_round_trips() {
        let key = PixKey::cpf("11122233344").unwrap();
        assert_eq!(PixKey::try_from(String::from(key.clone())), Ok(key));
    }
}
