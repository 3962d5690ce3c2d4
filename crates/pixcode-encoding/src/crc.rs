//! CRC-16/CCITT-FALSE checksum over assembled payloads.
//!
//! Parameters fixed by the payload standard: polynomial `0x1021`, initial
//! value `0xFFFF`, no bit reflection, no final XOR. The checksum covers
//! every payload character up to and including the `6304` header of the
//! checksum object itself.

use crate::definitions;
use crate::error::DecodeError;

/// Computes the checksum of `data`.
pub fn checksum(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Appends the checksum object to `payload` and returns the finished string.
///
/// The object is the `63` tag, the fixed `04` length, then the checksum of
/// everything before it as four uppercase hexadecimal digits.
pub fn append_checksum(mut payload: String) -> String {
    payload.push_str(&format!("{}04", definitions::CRC.tag()));
    let crc = checksum(payload.as_bytes());
    payload.push_str(&format!("{crc:04X}"));
    payload
}

/// Checks that `payload` ends with a checksum object matching its contents.
///
/// This is a flat suffix check; callers that need the checksum object to be
/// structurally last should walk the fields first.
pub fn verify(payload: &str) -> Result<(), DecodeError> {
    if payload.len() < 8 {
        return Err(DecodeError::MissingChecksum);
    }
    let split = payload.len() - 4;
    let (body, found) = match (payload.get(..split), payload.get(split..)) {
        (Some(body), Some(found)) => (body, found),
        _ => return Err(DecodeError::MissingChecksum),
    };
    if !body.ends_with("6304") {
        return Err(DecodeError::MissingChecksum);
    }
    if !found.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidChecksum);
    }
    let found = u16::from_str_radix(found, 16).map_err(|_| DecodeError::InvalidChecksum)?;
    let computed = checksum(body.as_bytes());
    if computed != found {
        return Err(DecodeError::ChecksumMismatch { computed, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_reference_check_value() {
        // standard check input for CRC-16/CCITT-FALSE
        assert_eq!(checksum(b"123456789"), 0x29B1);
    }

    #[test]
    fn empty_input_yields_the_initial_value() {
        assert_eq!(checksum(b""), 0xFFFF);
    }

    #[test]
    fn append_covers_the_checksum_header() {
        let finished = append_checksum("000201".to_string());
        assert_eq!(finished.len(), 6 + 8);
        assert!(finished.starts_with("0002016304"));
        let expected = checksum(b"0002016304");
        assert!(finished.ends_with(&format!("{expected:04X}")));
    }

    #[test]
    fn verify_accepts_what_append_produced() {
        let finished = append_checksum("000201010212".to_string());
        assert_eq!(verify(&finished), Ok(()));
    }

    #[test]
    fn verify_accepts_lowercase_hex() {
        let finished = append_checksum("000201".to_string()).to_lowercase();
        assert_eq!(verify(&finished), Ok(()));
    }

    #[test]
    fn verify_rejects_a_corrupted_body() {
        let mut finished = append_checksum("000201010212".to_string());
        finished.replace_range(4..5, "2");
        assert!(matches!(
            verify(&finished),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn verify_rejects_non_hex_checksum_characters() {
        assert_eq!(
            verify("0002016304ZZZZ"),
            Err(DecodeError::InvalidChecksum)
        );
    }

    #[test]
    fn verify_rejects_payloads_without_a_trailing_checksum() {
        assert_eq!(verify("000201"), Err(DecodeError::MissingChecksum));
        assert_eq!(verify("00020101"), Err(DecodeError::MissingChecksum));
    }
}
