use crate::field::Tag;

/// The type returned when building wire fields fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The tag does not fit the two-digit `00`-`99` identifier.
    #[error("tag {0} is outside the 00-99 range")]
    TagOutOfRange(u8),
    /// The value is longer than the two-digit length prefix can express.
    #[error("value of field {tag} is {len} bytes, over the 99-byte limit")]
    ValueTooLong { tag: Tag, len: usize },
}

/// The type returned in the event of an error during payload decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer than four characters remain where a field header is expected.
    #[error("truncated field header at position {position}")]
    TruncatedHeader { position: usize },
    /// The two tag characters are not ASCII digits.
    #[error("malformed tag at position {position}")]
    InvalidTag { position: usize },
    /// The two length characters are not ASCII digits.
    #[error("malformed length prefix at position {position}")]
    InvalidLength { position: usize },
    /// A declared value length runs past the end of the input.
    #[error("field at position {position} declares {declared} bytes but only {remaining} remain")]
    LengthOverrun {
        position: usize,
        declared: usize,
        remaining: usize,
    },
    /// The value bytes are not valid UTF-8, or the declared length splits
    /// a multi-byte character.
    #[error("malformed field value at position {position}")]
    InvalidValue { position: usize },
    /// The payload does not end with the eight-character checksum object.
    #[error("payload does not end with a checksum field")]
    MissingChecksum,
    /// The four checksum characters are not hexadecimal digits.
    #[error("malformed checksum value")]
    InvalidChecksum,
    /// The trailing checksum does not match the recomputed one.
    #[error("checksum mismatch: computed {computed:04X}, found {found:04X}")]
    ChecksumMismatch { computed: u16, found: u16 },
}
