use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unknown_key::{UnknownKeyError, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn all() -> &'static [SkillLevel] {
        &[Self::Beginner, Self::Intermediate, Self::Expert]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }

    /// Rate multiplier for this skill level.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Beginner => Decimal::ONE,
            Self::Intermediate => Decimal::new(125, 2),
            Self::Expert => Decimal::new(15, 1),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key("skill level", s, Self::all(), SkillLevel::as_str)
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
