//! Payload assembly and the decode path back from payload text.
//!
//! Assembly is infallible: every value a charge can hold has already been
//! validated at construction, so turning a charge into payload text cannot
//! run into anything rejectable. Decoding is the opposite and reports
//! everything: wire-level damage, checksum mismatches and values that fail
//! domain validation.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use pixcode_encoding::definitions::{self, FieldDef};
use pixcode_encoding::{crc, parse_fields, Field, Template};

use crate::amount::Amount;
use crate::charge::{
    Charge, Description, DynamicCharge, PointOfInitiation, StaticCharge, TxId, TXID_SENTINEL,
};
use crate::error::{ParseError, ValidationError};
use crate::key::PixKey;
use crate::merchant::Merchant;

/// Scheme identifier carried in the merchant account template.
pub const PIX_GUI: &str = "br.gov.bcb.pix";
/// The only published payload format version.
pub const PAYLOAD_FORMAT: &str = "01";
/// Merchant category code for an uncategorized merchant.
pub const MCC_UNCATEGORIZED: &str = "0000";
/// ISO 4217 numeric code for the real.
pub const CURRENCY_BRL: &str = "986";
/// ISO 3166-1 alpha-2 country code.
pub const COUNTRY_BR: &str = "BR";

/// A fully assembled charge code: printable ASCII, fixed object order,
/// terminated by the checksum object.
///
/// The inner string is exactly what goes into the QR symbol or the
/// copy-and-paste field, byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Reads the payload back into a structured view, verifying the
    /// checksum along the way.
    pub fn decode(&self) -> Result<DecodedCharge, ParseError> {
        DecodedCharge::parse(&self.0)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn field(def: &FieldDef, value: &str) -> Field {
    Field::new(def.tag(), value).expect("charge values are bounded at construction")
}

fn write_field(out: &mut String, def: &FieldDef, value: &str) {
    field(def, value).write(out);
}

fn merchant_account(key: &PixKey, description: Option<&Description>) -> Field {
    let mut template = Template::new();
    template.push(field(definitions::MAI_GUI, PIX_GUI));
    template.push(field(definitions::MAI_KEY, key.as_str()));
    if let Some(description) = description {
        template.push(field(definitions::MAI_DESCRIPTION, description.as_str()));
    }
    Field::template(definitions::MERCHANT_ACCOUNT_INFORMATION.tag(), &template)
        .expect("template length is checked when the description is attached")
}

fn additional_data(txid: Option<&TxId>) -> Field {
    let label = txid.map(TxId::as_str).unwrap_or(TXID_SENTINEL);
    let mut template = Template::new();
    template.push(field(definitions::REFERENCE_LABEL, label));
    Field::template(definitions::ADDITIONAL_DATA_FIELD_TEMPLATE.tag(), &template)
        .expect("the reference label is at most 25 bytes")
}

fn assemble(
    poi: PointOfInitiation,
    key: &PixKey,
    merchant: &Merchant,
    amount: Option<Amount>,
    description: Option<&Description>,
    txid: Option<&TxId>,
) -> Payload {
    let mut out = String::with_capacity(160);
    write_field(&mut out, definitions::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT);
    write_field(&mut out, definitions::POINT_OF_INITIATION_METHOD, poi.as_wire());
    merchant_account(key, description).write(&mut out);
    write_field(&mut out, definitions::MERCHANT_CATEGORY_CODE, MCC_UNCATEGORIZED);
    write_field(&mut out, definitions::TRANSACTION_CURRENCY, CURRENCY_BRL);
    if let Some(amount) = amount {
        write_field(&mut out, definitions::TRANSACTION_AMOUNT, &amount.to_string());
    }
    write_field(&mut out, definitions::COUNTRY_CODE, COUNTRY_BR);
    write_field(&mut out, definitions::MERCHANT_NAME, merchant.name.as_str());
    write_field(&mut out, definitions::MERCHANT_CITY, merchant.city.as_str());
    if let Some(postal_code) = &merchant.postal_code {
        write_field(&mut out, definitions::POSTAL_CODE, postal_code.as_str());
    }
    additional_data(txid).write(&mut out);
    let payload = crc::append_checksum(out);
    debug!(len = payload.len(), poi = %poi, "assembled charge payload");
    Payload(payload)
}

impl StaticCharge {
    /// Assembles the payload text for this charge.
    pub fn to_payload(&self) -> Payload {
        assemble(
            self.point_of_initiation(),
            &self.key,
            &self.merchant,
            None,
            self.description.as_ref(),
            self.txid.as_ref(),
        )
    }
}

impl DynamicCharge {
    /// Assembles the payload text for this charge.
    pub fn to_payload(&self) -> Payload {
        assemble(
            self.point_of_initiation(),
            &self.key,
            &self.merchant,
            Some(self.amount),
            self.description.as_ref(),
            self.txid.as_ref(),
        )
    }
}

impl Charge {
    pub fn to_payload(&self) -> Payload {
        match self {
            Charge::Static(charge) => charge.to_payload(),
            Charge::Dynamic(charge) => charge.to_payload(),
        }
    }
}

/// The structured view read back from payload text.
///
/// Read tolerance is wider than write strictness: objects this crate never
/// emits are skipped, the initiation method may be absent, and merchant
/// text comes back as plain strings rather than re-validated newtypes,
/// since foreign payloads take liberties our constructors would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCharge {
    pub point_of_initiation: Option<PointOfInitiation>,
    pub key: PixKey,
    pub merchant_name: String,
    pub merchant_city: String,
    pub postal_code: Option<String>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
    pub txid: Option<String>,
}

impl DecodedCharge {
    /// Parses and checks payload text.
    ///
    /// The checksum is verified before anything is interpreted; a payload
    /// that fails it reports [`pixcode_encoding::DecodeError::ChecksumMismatch`]
    /// rather than whatever field-level damage the corruption caused.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        use pixcode_encoding::DecodeError;

        let fields = parse_fields(input)?;
        let (last, body) = fields
            .split_last()
            .ok_or(ParseError::Decode(DecodeError::MissingChecksum))?;
        if last.tag != definitions::CRC.tag() {
            return Err(ParseError::Decode(DecodeError::MissingChecksum));
        }
        if last.value.len() != 4 || !last.value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::Decode(DecodeError::InvalidChecksum));
        }
        let found = u16::from_str_radix(last.value, 16)
            .map_err(|_| ParseError::Decode(DecodeError::InvalidChecksum))?;
        // the checksum value is four ASCII characters, so this split is safe
        let covered = &input[..input.len() - 4];
        let computed = crc::checksum(covered.as_bytes());
        if computed != found {
            return Err(ParseError::Decode(DecodeError::ChecksumMismatch {
                computed,
                found,
            }));
        }

        let mut format = None;
        let mut poi = None;
        let mut mai_seen = false;
        let mut gui = None;
        let mut key_raw = None;
        let mut description = None;
        let mut currency = None;
        let mut amount = None;
        let mut merchant_name = None;
        let mut merchant_city = None;
        let mut postal_code = None;
        let mut label = None;

        for field in body {
            match field.tag.get() {
                0 => format = Some(field.value),
                1 => poi = PointOfInitiation::from_wire(field.value),
                26 => {
                    mai_seen = true;
                    for sub in field.subfields()? {
                        match sub.tag.get() {
                            0 => gui = Some(sub.value.to_string()),
                            1 => key_raw = Some(sub.value.to_string()),
                            2 => description = Some(sub.value.to_string()),
                            _ => {}
                        }
                    }
                }
                53 => currency = Some(field.value),
                54 => {
                    let parsed = field
                        .value
                        .parse::<Amount>()
                        .map_err(ValidationError::InvalidAmount)?;
                    amount = Some(parsed);
                }
                59 => merchant_name = Some(field.value.to_string()),
                60 => merchant_city = Some(field.value.to_string()),
                61 => postal_code = Some(field.value.to_string()),
                62 => {
                    for sub in field.subfields()? {
                        if sub.tag == definitions::REFERENCE_LABEL.tag() {
                            label = Some(sub.value.to_string());
                        }
                    }
                }
                63 => return Err(ParseError::ChecksumNotFinal),
                _ => {}
            }
        }

        let format =
            format.ok_or(ParseError::MissingObject(definitions::PAYLOAD_FORMAT_INDICATOR.name))?;
        if format != PAYLOAD_FORMAT {
            return Err(ParseError::UnsupportedFormat {
                found: format.to_string(),
            });
        }
        if !mai_seen {
            return Err(ParseError::MissingObject(
                definitions::MERCHANT_ACCOUNT_INFORMATION.name,
            ));
        }
        let gui = gui.ok_or(ParseError::MissingObject(definitions::MAI_GUI.name))?;
        if !gui.eq_ignore_ascii_case(PIX_GUI) {
            return Err(ParseError::SchemeMismatch { found: gui });
        }
        let key: PixKey = key_raw
            .ok_or(ParseError::MissingObject(definitions::MAI_KEY.name))?
            .parse()?;
        let currency =
            currency.ok_or(ParseError::MissingObject(definitions::TRANSACTION_CURRENCY.name))?;
        if currency != CURRENCY_BRL {
            return Err(ParseError::UnsupportedCurrency {
                found: currency.to_string(),
            });
        }
        let merchant_name =
            merchant_name.ok_or(ParseError::MissingObject(definitions::MERCHANT_NAME.name))?;
        let merchant_city =
            merchant_city.ok_or(ParseError::MissingObject(definitions::MERCHANT_CITY.name))?;
        let txid = label.filter(|label| label != TXID_SENTINEL);

        debug!(len = input.len(), key = %key, "decoded charge payload");
        Ok(Self {
            point_of_initiation: poi,
            key,
            merchant_name,
            merchant_city,
            postal_code,
            amount,
            description,
            txid,
        })
    }
}

impl FromStr for DecodedCharge {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
