use pixcode_encoding::DecodeError;

use crate::key::KeyKind;

/// Errors raised while validating caller-supplied charge attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Merchant name empty, over 25 bytes, or not printable ASCII.
    #[error("merchant name must be 1-25 printable ASCII characters")]
    InvalidMerchantName,
    /// Merchant city empty, over 15 bytes, or not printable ASCII.
    #[error("merchant city must be 1-15 printable ASCII characters")]
    InvalidMerchantCity,
    /// Postal code empty, over 10 bytes, or not ASCII alphanumeric.
    #[error("postal code must be 1-10 ASCII alphanumeric characters")]
    InvalidPostalCode,
    /// Transaction id empty, over 25 bytes, or not ASCII alphanumeric.
    #[error("transaction id must be 1-25 ASCII alphanumeric characters")]
    InvalidTxId,
    /// Description empty, over 99 bytes, or not printable ASCII.
    #[error("description must be 1-99 printable ASCII characters")]
    InvalidDescription,
    /// The description does not fit the merchant account template next to
    /// the scheme identifier and the key.
    #[error("description of {len} bytes does not fit the merchant account template ({available} bytes available)")]
    DescriptionTooLong { len: usize, available: usize },
    /// The key does not have the shape its kind requires.
    #[error("malformed {kind} key")]
    MalformedKey { kind: KeyKind },
    /// The key matches none of the accepted shapes.
    #[error("key matches no accepted shape")]
    UnrecognizedKey,
    /// The amount string or value is invalid.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
}

/// Errors raised while parsing or constructing amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input is empty.
    #[error("amount is empty")]
    Empty,
    /// Negative amounts cannot be charged.
    #[error("amount cannot be negative")]
    Negative,
    /// The input is not a plain decimal number.
    #[error("amount is not a decimal number")]
    Malformed,
    /// More fractional digits than the two the wire format carries.
    #[error("amount has {decimals} decimal digits, at most 2 are representable")]
    TooManyDecimals { decimals: usize },
    /// Zero-amount codes are indistinguishable from open-amount ones.
    #[error("amount must be positive")]
    Zero,
    /// The integer part is over the 13 digits the amount object allows.
    #[error("amount exceeds 13 integer digits")]
    TooLarge,
}

/// Errors raised while decoding a payload back into a charge view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The wire structure itself is broken.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A decoded value fails domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The payload format indicator is not the supported version.
    #[error("payload format indicator {found:?} is not supported")]
    UnsupportedFormat { found: String },
    /// The merchant account template belongs to another scheme.
    #[error("merchant account scheme {found:?} is not br.gov.bcb.pix")]
    SchemeMismatch { found: String },
    /// The transaction currency is not BRL.
    #[error("transaction currency {found:?} is not 986 (BRL)")]
    UnsupportedCurrency { found: String },
    /// A checksum object appeared before the end of the payload.
    #[error("checksum object is not the final data object")]
    ChecksumNotFinal,
    /// A required object is absent.
    #[error("payload is missing the {0} object")]
    MissingObject(&'static str),
}
