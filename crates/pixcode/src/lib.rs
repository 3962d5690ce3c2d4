//! Merchant-presented Pix charge codes: validated charge requests in,
//! standards-exact payload text out.
//!
//! A charge is either [`StaticCharge`] (reusable, the payer keys in the
//! amount) or [`DynamicCharge`] (single payment of a fixed amount). Every
//! attribute is validated when the charge is built, so assembly itself
//! cannot fail and two identical charges always produce identical text.
//!
//! ```
//! use pixcode::{DynamicCharge, Merchant, MerchantCity, MerchantName, PixKey, TxId};
//!
//! let merchant = Merchant::new(
//!     MerchantName::new("WOLK STORE")?,
//!     MerchantCity::new("SAO PAULO")?,
//! );
//! let charge = DynamicCharge::new(PixKey::cpf("11122233344")?, merchant, "10.00".parse()?)
//!     .with_txid(TxId::new("ABC123")?);
//! let payload = charge.to_payload();
//! assert!(payload.as_str().starts_with("000201"));
//! assert!(payload.as_str().ends_with("4903"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`DecodedCharge`] walks the other direction: it verifies the checksum
//! and reads a payload back into a structured view, accepting the odd
//! liberties that payloads from other generators take.

mod amount;
mod charge;
mod error;
mod key;
mod merchant;
mod payload;

pub use amount::Amount;
pub use charge::{
    Charge, Description, DynamicCharge, PointOfInitiation, StaticCharge, TxId, TXID_SENTINEL,
};
pub use error::{AmountError, ParseError, ValidationError};
pub use key::{KeyKind, PixKey, MAX_KEY_LEN};
pub use merchant::{Merchant, MerchantCity, MerchantName, PostalCode};
pub use payload::{
    DecodedCharge, Payload, COUNTRY_BR, CURRENCY_BRL, MCC_UNCATEGORIZED, PAYLOAD_FORMAT, PIX_GUI,
};

pub use pixcode_encoding as encoding;
