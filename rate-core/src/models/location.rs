use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unknown_key::{UnknownKeyError, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    NorthAmerica,
    WesternEurope,
    UnitedKingdom,
    EasternEurope,
    Oceania,
    MiddleEast,
    LatinAmerica,
    Asia,
    Africa,
}

impl Location {
    pub fn all() -> &'static [Location] {
        &[
            Self::NorthAmerica,
            Self::WesternEurope,
            Self::UnitedKingdom,
            Self::EasternEurope,
            Self::Oceania,
            Self::MiddleEast,
            Self::LatinAmerica,
            Self::Asia,
            Self::Africa,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "north-america",
            Self::WesternEurope => "western-europe",
            Self::UnitedKingdom => "united-kingdom",
            Self::EasternEurope => "eastern-europe",
            Self::Oceania => "oceania",
            Self::MiddleEast => "middle-east",
            Self::LatinAmerica => "latin-america",
            Self::Asia => "asia",
            Self::Africa => "africa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::WesternEurope => "Western Europe",
            Self::UnitedKingdom => "United Kingdom",
            Self::EasternEurope => "Eastern Europe",
            Self::Oceania => "Oceania",
            Self::MiddleEast => "Middle East",
            Self::LatinAmerica => "Latin America",
            Self::Asia => "Asia",
            Self::Africa => "Africa",
        }
    }

    /// Cost-of-market multiplier relative to North America.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::NorthAmerica | Self::UnitedKingdom => Decimal::ONE,
            Self::WesternEurope | Self::Oceania => Decimal::new(95, 2),
            Self::MiddleEast => Decimal::new(8, 1),
            Self::EasternEurope => Decimal::new(6, 1),
            Self::LatinAmerica => Decimal::new(55, 2),
            Self::Asia => Decimal::new(5, 1),
            Self::Africa => Decimal::new(45, 2),
        }
    }
}

impl FromStr for Location {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key("location", s, Self::all(), Location::as_str)
    }
}

impl fmt::Display for Location {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
