use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unknown_key::{UnknownKeyError, parse_key};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Inr,
    Jpy,
}

/// Static display and conversion data for a currency.
///
/// `rate_relative_to_usd` is the number of units of this currency that buy
/// one US dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyProfile {
    pub symbol: &'static str,
    pub rate_relative_to_usd: Decimal,
    pub name: &'static str,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[
            Self::Usd,
            Self::Eur,
            Self::Gbp,
            Self::Cad,
            Self::Aud,
            Self::Inr,
            Self::Jpy,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Inr => "INR",
            Self::Jpy => "JPY",
        }
    }

    pub fn profile(&self) -> CurrencyProfile {
        match self {
            Self::Usd => CurrencyProfile {
                symbol: "$",
                rate_relative_to_usd: Decimal::ONE,
                name: "US Dollar",
            },
            Self::Eur => CurrencyProfile {
                symbol: "€",
                rate_relative_to_usd: Decimal::new(92, 2),
                name: "Euro",
            },
            Self::Gbp => CurrencyProfile {
                symbol: "£",
                rate_relative_to_usd: Decimal::new(79, 2),
                name: "British Pound",
            },
            Self::Cad => CurrencyProfile {
                symbol: "C$",
                rate_relative_to_usd: Decimal::new(136, 2),
                name: "Canadian Dollar",
            },
            Self::Aud => CurrencyProfile {
                symbol: "A$",
                rate_relative_to_usd: Decimal::new(152, 2),
                name: "Australian Dollar",
            },
            Self::Inr => CurrencyProfile {
                symbol: "₹",
                rate_relative_to_usd: Decimal::from(83),
                name: "Indian Rupee",
            },
            Self::Jpy => CurrencyProfile {
                symbol: "¥",
                rate_relative_to_usd: Decimal::from(150),
                name: "Japanese Yen",
            },
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.profile().symbol
    }

    pub fn rate_relative_to_usd(&self) -> Decimal {
        self.profile().rate_relative_to_usd
    }
}

impl FromStr for Currency {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key("currency", s, Self::all(), Currency::code)
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn usd_is_the_base_currency() {
        assert_eq!(Currency::default(), Currency::Usd);
        assert_eq!(Currency::Usd.rate_relative_to_usd(), Decimal::ONE);
    }

    #[test]
    fn every_rate_is_positive() {
        for currency in Currency::all() {
            assert!(currency.rate_relative_to_usd() > Decimal::ZERO);
        }
    }

    #[test]
    fn serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        assert_eq!(
            serde_json::from_str::<Currency>("\"JPY\"").unwrap(),
            Currency::Jpy
        );
    }

    #[test]
    fn parse_accepts_lowercase_codes() {
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::Eur));
    }
}
