//! Charge requests: the validated input that payload assembly consumes.
//!
//! A charge is either static (reusable, payer keys in the amount) or
//! dynamic (single payment of a fixed amount). Making these two types
//! instead of one struct with optional fields keeps the impossible
//! combinations unrepresentable: a dynamic charge always has an amount, a
//! static one never does.

use std::fmt;

use pixcode_encoding::MAX_VALUE_LEN;

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::key::PixKey;
use crate::merchant::{is_printable_ascii, Merchant};
use crate::payload::PIX_GUI;

/// Reference label emitted when the charge carries no transaction id.
pub const TXID_SENTINEL: &str = "***";

/// How the payer's app treats the code, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointOfInitiation {
    /// Reusable: the same code is presented to every customer.
    Static,
    /// Single payment: the code is shown once and settles one charge.
    Dynamic,
}

impl PointOfInitiation {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            PointOfInitiation::Static => "11",
            PointOfInitiation::Dynamic => "12",
        }
    }

    pub(crate) fn from_wire(value: &str) -> Option<Self> {
        match value {
            "11" => Some(PointOfInitiation::Static),
            "12" => Some(PointOfInitiation::Dynamic),
            _ => None,
        }
    }
}

impl fmt::Display for PointOfInitiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PointOfInitiation::Static => "static",
            PointOfInitiation::Dynamic => "dynamic",
        })
    }
}

/// Transaction id, 1 to 25 ASCII alphanumeric characters.
///
/// Carried as the reference label and echoed back by the rail in the
/// settlement webhook, which is what makes reconciliation work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(String);

impl TxId {
    pub const MAX_LEN: usize = 25;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty()
            || value.len() > Self::MAX_LEN
            || !value.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidTxId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text description shown to the payer, printable ASCII.
///
/// Construction bounds it to what a field can carry at all; whether it
/// fits next to a particular key is checked when it is attached to a
/// charge, because the two share the merchant account template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_VALUE_LEN || !is_printable_ascii(&value) {
            return Err(ValidationError::InvalidDescription);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// The merchant account template holds the scheme identifier, the key and
// the description, each with a four-character header, inside one 99-byte
// value. The description is the elastic part, so it takes the blame when
// the three do not fit.
fn check_description_fits(key: &PixKey, description: &Description) -> Result<(), ValidationError> {
    let fixed = 4 + PIX_GUI.len() + 4 + key.as_str().len() + 4;
    let available = MAX_VALUE_LEN.saturating_sub(fixed);
    let len = description.as_str().len();
    if len > available {
        return Err(ValidationError::DescriptionTooLong { len, available });
    }
    Ok(())
}

/// A reusable charge. The payer keys in the amount at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCharge {
    pub(crate) key: PixKey,
    pub(crate) merchant: Merchant,
    pub(crate) description: Option<Description>,
    pub(crate) txid: Option<TxId>,
}

impl StaticCharge {
    pub fn new(key: PixKey, merchant: Merchant) -> Self {
        Self {
            key,
            merchant,
            description: None,
            txid: None,
        }
    }

    /// Attaches a description, checking it fits next to the key.
    pub fn with_description(self, description: Description) -> Result<Self, ValidationError> {
        check_description_fits(&self.key, &description)?;
        Ok(Self {
            description: Some(description),
            ..self
        })
    }

    /// Attaches a concrete transaction id instead of the `***` sentinel.
    pub fn with_txid(self, txid: TxId) -> Self {
        Self {
            txid: Some(txid),
            ..self
        }
    }

    pub fn key(&self) -> &PixKey {
        &self.key
    }

    pub fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn txid(&self) -> Option<&TxId> {
        self.txid.as_ref()
    }

    /// Reusable codes are announced as static unless they pin a concrete
    /// transaction id, which makes each presentation a tracked payment.
    pub fn point_of_initiation(&self) -> PointOfInitiation {
        if self.txid.is_some() {
            PointOfInitiation::Dynamic
        } else {
            PointOfInitiation::Static
        }
    }
}

/// A single-use charge with the amount fixed in the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicCharge {
    pub(crate) key: PixKey,
    pub(crate) merchant: Merchant,
    pub(crate) amount: Amount,
    pub(crate) description: Option<Description>,
    pub(crate) txid: Option<TxId>,
}

impl DynamicCharge {
    pub fn new(key: PixKey, merchant: Merchant, amount: Amount) -> Self {
        Self {
            key,
            merchant,
            amount,
            description: None,
            txid: None,
        }
    }

    /// Attaches a description, checking it fits next to the key.
    pub fn with_description(self, description: Description) -> Result<Self, ValidationError> {
        check_description_fits(&self.key, &description)?;
        Ok(Self {
            description: Some(description),
            ..self
        })
    }

    pub fn with_txid(self, txid: TxId) -> Self {
        Self {
            txid: Some(txid),
            ..self
        }
    }

    pub fn key(&self) -> &PixKey {
        &self.key
    }

    pub fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn txid(&self) -> Option<&TxId> {
        self.txid.as_ref()
    }

    pub fn point_of_initiation(&self) -> PointOfInitiation {
        PointOfInitiation::Dynamic
    }
}

/// Either flavor of charge, for call sites that handle both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charge {
    Static(StaticCharge),
    Dynamic(DynamicCharge),
}

impl From<StaticCharge> for Charge {
    fn from(charge: StaticCharge) -> Self {
        Charge::Static(charge)
    }
}

impl From<DynamicCharge> for Charge {
    fn from(charge: DynamicCharge) -> Self {
        Charge::Dynamic(charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merchant::{MerchantCity, MerchantName};

    fn merchant() -> Merchant {
        Merchant::new(
            MerchantName::new("WOLK STORE").unwrap(),
            MerchantCity::new("SAO PAULO").unwrap(),
        )
    }

    #[test]
    fn txid_accepts_up_to_twenty_five_alphanumerics() {
        assert!(TxId::new("ABC123").is_ok());
        assert!(TxId::new("X".repeat(25)).is_ok());
    }

    #[test]
    fn txid_rejects_oversized_and_non_alphanumeric_values() {
        assert_eq!(
            TxId::new("X".repeat(26)),
            Err(ValidationError::InvalidTxId)
        );
        assert_eq!(TxId::new("AB-12"), Err(ValidationError::InvalidTxId));
        assert_eq!(TxId::new(""), Err(ValidationError::InvalidTxId));
    }

    #[test]
    fn static_charge_without_txid_is_announced_static() {
        let charge = StaticCharge::new(PixKey::cpf("11122233344").unwrap(), merchant());
        assert_eq!(charge.point_of_initiation(), PointOfInitiation::Static);
    }

    #[test]
    fn static_charge_with_txid_is_announced_dynamic() {
        let charge = StaticCharge::new(PixKey::cpf("11122233344").unwrap(), merchant())
            .with_txid(TxId::new("ABC123").unwrap());
        assert_eq!(charge.point_of_initiation(), PointOfInitiation::Dynamic);
    }

    #[test]
    fn description_room_depends_on_key_length() {
        // 99 less the 18-byte scheme object and the two other headers
        // leaves 73 - key bytes for the description
        let key = PixKey::cpf("11122233344").unwrap();
        let charge = StaticCharge::new(key.clone(), merchant());
        let fits = Description::new("d".repeat(62)).unwrap();
        assert!(charge.clone().with_description(fits).is_ok());
        let too_long = Description::new("d".repeat(63)).unwrap();
        assert_eq!(
            charge.with_description(too_long),
            Err(ValidationError::DescriptionTooLong {
                len: 63,
                available: 62
            })
        );
    }

    #[test]
    fn maximum_length_key_leaves_no_description_room() {
        let local = "x".repeat(65);
        let key = PixKey::email(format!("{local}@example.com")).unwrap();
        let charge = StaticCharge::new(key, merchant());
        assert_eq!(
            charge.with_description(Description::new("x").unwrap()),
            Err(ValidationError::DescriptionTooLong {
                len: 1,
                available: 0
            })
        );
    }
}
