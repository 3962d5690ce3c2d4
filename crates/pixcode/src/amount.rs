use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmountError;

const CENTAVOS_PER_REAL: u64 = 100;

/// A transaction amount in centavos.
///
/// The amount object renders with exactly two fractional digits, so the
/// in-memory representation is the integer number of centavos. This keeps
/// equality and arithmetic exact; `10`, `10.0` and `10.00` all parse to the
/// same value and render back as `10.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u64);

impl Amount {
    /// Largest representable amount: 13 integer digits, two centavo digits.
    pub const MAX: Amount = Amount(9_999_999_999_999_99);

    pub fn from_centavos(centavos: u64) -> Result<Self, AmountError> {
        if centavos == 0 {
            return Err(AmountError::Zero);
        }
        if centavos > Self::MAX.0 {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(centavos))
    }

    pub const fn centavos(&self) -> u64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AmountError::Empty);
        }
        if input.starts_with('-') {
            return Err(AmountError::Negative);
        }
        let mut parts = input.split('.');
        let whole = parts.next().expect("split yields at least one part");
        let fraction = parts.next();
        if parts.next().is_some() {
            return Err(AmountError::Malformed);
        }
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed);
        }
        let whole: u64 = whole.parse().map_err(|_| AmountError::TooLarge)?;
        let frac_centavos = match fraction {
            None => 0,
            Some(fraction) => {
                if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AmountError::Malformed);
                }
                if fraction.len() > 2 {
                    return Err(AmountError::TooManyDecimals {
                        decimals: fraction.len(),
                    });
                }
                let parsed: u64 = fraction.parse().expect("fraction is 1-2 digits");
                if fraction.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };
        let centavos = whole
            .checked_mul(CENTAVOS_PER_REAL)
            .and_then(|c| c.checked_add(frac_centavos))
            .ok_or(AmountError::TooLarge)?;
        Self::from_centavos(centavos)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTAVOS_PER_REAL,
            self.0 % CENTAVOS_PER_REAL
        )
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_exactly_two_decimals() {
        assert_eq!(Amount::from_centavos(1000).unwrap().to_string(), "10.00");
        assert_eq!(Amount::from_centavos(50).unwrap().to_string(), "0.50");
        assert_eq!(Amount::from_centavos(1).unwrap().to_string(), "0.01");
        assert_eq!(
            Amount::MAX.to_string(),
            "9999999999999.99"
        );
    }

    #[test]
    fn equivalent_spellings_parse_to_the_same_value() {
        let canonical: Amount = "10.00".parse().unwrap();
        assert_eq!("10".parse::<Amount>().unwrap(), canonical);
        assert_eq!("10.0".parse::<Amount>().unwrap(), canonical);
        assert_eq!(" 10.00 ".parse::<Amount>().unwrap(), canonical);
    }

    #[test]
    fn single_decimal_digit_means_tens_of_centavos() {
        assert_eq!("0.5".parse::<Amount>().unwrap().centavos(), 50);
        assert_eq!("123.4".parse::<Amount>().unwrap().centavos(), 12340);
    }

    #[test]
    fn rejects_zero() {
        assert_eq!("0".parse::<Amount>(), Err(AmountError::Zero));
        assert_eq!("0.00".parse::<Amount>(), Err(AmountError::Zero));
        assert_eq!(Amount::from_centavos(0), Err(AmountError::Zero));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!("-1.00".parse::<Amount>(), Err(AmountError::Negative));
    }

    #[test]
    fn rejects_more_than_two_decimals() {
        assert_eq!(
            "1.005".parse::<Amount>(),
            Err(AmountError::TooManyDecimals { decimals: 3 })
        );
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert_eq!("".parse::<Amount>(), Err(AmountError::Empty));
        assert_eq!("1.".parse::<Amount>(), Err(AmountError::Malformed));
        assert_eq!(".5".parse::<Amount>(), Err(AmountError::Malformed));
        assert_eq!("1.2.3".parse::<Amount>(), Err(AmountError::Malformed));
        assert_eq!("1,00".parse::<Amount>(), Err(AmountError::Malformed));
        assert_eq!("R$10".parse::<Amount>(), Err(AmountError::Malformed));
        assert_eq!("1e2".parse::<Amount>(), Err(AmountError::Malformed));
    }

    #[test]
    fn rejects_amounts_over_thirteen_integer_digits() {
        assert_eq!(
            "9999999999999.99".parse::<Amount>().unwrap(),
            Amount::MAX
        );
        assert_eq!("10000000000000".parse::<Amount>(), Err(AmountError::TooLarge));
        assert_eq!(
            Amount::from_centavos(Amount::MAX.centavos() + 1),
            Err(AmountError::TooLarge)
        );
    }

    #[test]
    fn round_trips_through_strings() {
        let amount: Amount = "1234567890123.99".parse().unwrap();
        assert_eq!(amount.to_string(), "1234567890123.99");
        assert_eq!(Amount::try_from(String::from(amount)), Ok(amount));
    }
}
