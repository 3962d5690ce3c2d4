//! Hard-coded definitions for the data objects of a merchant-presented
//! payload, top-level and nested. The catalogue is small and fixed, so the
//! definitions are spelled out rather than generated from a dictionary.

use crate::field::Tag;

/// Definition of a single data object: its canonical name and tag number.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub tag: u8,
}

impl FieldDef {
    /// Returns the typed tag for this definition.
    pub fn tag(&self) -> Tag {
        Tag::new(self.tag).expect("definition tags are within the 00-99 range")
    }
}

/// Version of the payload layout, always the first object.
pub const PAYLOAD_FORMAT_INDICATOR: &FieldDef = &FieldDef {
    name: "PayloadFormatIndicator",
    tag: 0,
};

/// Whether the code is reusable (`11`) or for a single payment (`12`).
pub const POINT_OF_INITIATION_METHOD: &FieldDef = &FieldDef {
    name: "PointOfInitiationMethod",
    tag: 1,
};

/// Scheme-specific template identifying the receiving account.
pub const MERCHANT_ACCOUNT_INFORMATION: &FieldDef = &FieldDef {
    name: "MerchantAccountInformation",
    tag: 26,
};

/// ISO 18245 merchant category code.
pub const MERCHANT_CATEGORY_CODE: &FieldDef = &FieldDef {
    name: "MerchantCategoryCode",
    tag: 52,
};

/// ISO 4217 numeric currency code.
pub const TRANSACTION_CURRENCY: &FieldDef = &FieldDef {
    name: "TransactionCurrency",
    tag: 53,
};

/// Decimal transaction amount; omitted when the payer keys it in.
pub const TRANSACTION_AMOUNT: &FieldDef = &FieldDef {
    name: "TransactionAmount",
    tag: 54,
};

/// ISO 3166-1 alpha-2 country code.
pub const COUNTRY_CODE: &FieldDef = &FieldDef {
    name: "CountryCode",
    tag: 58,
};

/// Merchant display name.
pub const MERCHANT_NAME: &FieldDef = &FieldDef {
    name: "MerchantName",
    tag: 59,
};

/// Merchant city.
pub const MERCHANT_CITY: &FieldDef = &FieldDef {
    name: "MerchantCity",
    tag: 60,
};

/// Merchant postal code.
pub const POSTAL_CODE: &FieldDef = &FieldDef {
    name: "PostalCode",
    tag: 61,
};

/// Template of payment-level additions, such as the reference label.
pub const ADDITIONAL_DATA_FIELD_TEMPLATE: &FieldDef = &FieldDef {
    name: "AdditionalDataFieldTemplate",
    tag: 62,
};

/// CRC-16 checksum, always the final object and always four characters.
pub const CRC: &FieldDef = &FieldDef { name: "Crc", tag: 63 };

/// Sub-object of [`MERCHANT_ACCOUNT_INFORMATION`]: reverse-domain scheme
/// identifier.
pub const MAI_GUI: &FieldDef = &FieldDef {
    name: "GloballyUniqueIdentifier",
    tag: 0,
};

/// Sub-object of [`MERCHANT_ACCOUNT_INFORMATION`]: the recipient key.
pub const MAI_KEY: &FieldDef = &FieldDef {
    name: "MerchantAccountKey",
    tag: 1,
};

/// Sub-object of [`MERCHANT_ACCOUNT_INFORMATION`]: free-text description.
pub const MAI_DESCRIPTION: &FieldDef = &FieldDef {
    name: "MerchantAccountDescription",
    tag: 2,
};

/// Sub-object of [`ADDITIONAL_DATA_FIELD_TEMPLATE`]: the transaction id.
pub const REFERENCE_LABEL: &FieldDef = &FieldDef {
    name: "ReferenceLabel",
    tag: 5,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_tags_convert_to_typed_tags() {
        assert_eq!(PAYLOAD_FORMAT_INDICATOR.tag().get(), 0);
        assert_eq!(MERCHANT_ACCOUNT_INFORMATION.tag().get(), 26);
        assert_eq!(CRC.tag().get(), 63);
        assert_eq!(CRC.tag().to_string(), "63");
    }
}
