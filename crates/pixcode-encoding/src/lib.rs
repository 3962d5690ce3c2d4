//! Wire-format layer for merchant-presented payment codes: the `TTLLVV`
//! tag-length-value primitive, the hard-coded object catalogue, and the
//! CRC-16 checksum that terminates every payload.
//!
//! This crate knows nothing about scheme semantics. It encodes and decodes
//! fields and templates exactly as they appear on the wire; validation of
//! what goes inside them belongs to the layer above.

pub mod crc;
pub mod definitions;
mod error;
mod field;
mod parser;

pub use error::{DecodeError, EncodeError};
pub use field::{Field, Tag, Template, MAX_VALUE_LEN};
pub use parser::{parse_fields, RawField, TlvParser};
