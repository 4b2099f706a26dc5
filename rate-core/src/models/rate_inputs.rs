use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Currency, Industry, Location, SkillLevel};

/// Everything the rate engine needs to price an hour of work.
///
/// `skill_level`, `industry` and `desired_annual_income` are optional only so
/// that a missing value can be reported by validation; the engine rejects
/// inputs where they are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInputs {
    pub skill_level: Option<SkillLevel>,
    pub industry: Option<Industry>,
    /// Unset means no regional adjustment.
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub experience_years: Decimal,
    pub desired_annual_income: Option<Decimal>,
    #[serde(default)]
    pub annual_business_costs: Decimal,
    /// Percentage in `[0, 100)`.
    pub tax_rate_percent: Decimal,
    /// Hours in `[0, 40)`.
    pub non_billable_hours_per_week: Decimal,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub selected_skills: BTreeSet<String>,
}
