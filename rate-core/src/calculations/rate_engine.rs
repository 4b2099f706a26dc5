//! Hourly rate calculation for freelance work.
//!
//! The engine turns a desired income into an hourly rate and then scales it
//! by independent multipliers:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total required income: income + business costs + income × tax rate |
//! | 2    | Billable hours: 2080 − 52 × weekly non-billable hours |
//! | 3    | Skill multiplier (beginner 1.0, intermediate 1.25, expert 1.5) |
//! | 4    | Experience multiplier: 1 + min(years, 10) × 0.03 |
//! | 5    | Location multiplier (1.0 when unset) |
//! | 6    | Industry multiplier |
//! | 7    | Skills bonus: 1 + selected skills × 0.05 |
//! | 8    | Hourly rate: (Line 1 / Line 2) × Lines 3-7 |
//! | 9    | Daily rate: hourly × 8 |
//! | 10   | Monthly rate: hourly × (160 − non-billable hours × 4) |
//!
//! Nothing is rounded until the three final rates are produced.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rate_core::calculations::RateEngine;
//! use rate_core::{Industry, Location, RateInputs, SkillLevel};
//!
//! let inputs = RateInputs {
//!     skill_level: Some(SkillLevel::Intermediate),
//!     industry: Some(Industry::WebDevelopment),
//!     location: Some(Location::NorthAmerica),
//!     desired_annual_income: Some(dec!(104000)),
//!     ..Default::default()
//! };
//!
//! let calculation = RateEngine::default().calculate(&inputs).unwrap();
//!
//! assert_eq!(calculation.result.hourly, dec!(62.50));
//! assert_eq!(calculation.result.daily, dec!(500.00));
//! assert_eq!(calculation.result.monthly, dec!(10000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::validation::ValidationError;
use crate::{Currency, Industry, RateInputs, RateResult, SkillLevel};

/// Errors returned by [`RateEngine::calculate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateEngineError {
    /// One or more input fields are missing or out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The working year has no billable hours left.
    #[error("non-positive billable hours: {0}")]
    NonPositiveBillableHours(Decimal),

    /// An intermediate value left the range a [`Decimal`] can hold.
    #[error("{0} is too large to calculate")]
    Overflow(&'static str),
}

/// Errors found in a [`RateEngineConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateEngineConfigError {
    #[error("weeks per year must be positive, got {0}")]
    InvalidWeeksPerYear(Decimal),

    #[error("hours per week must be positive, got {0}")]
    InvalidHoursPerWeek(Decimal),

    #[error("experience cap must be non-negative, got {0}")]
    InvalidExperienceCap(Decimal),

    #[error("experience step must be non-negative, got {0}")]
    InvalidExperienceStep(Decimal),

    #[error("skills bonus step must be non-negative, got {0}")]
    InvalidSkillsBonusStep(Decimal),

    #[error("skills bonus cap must be at least 1, got {0}")]
    InvalidSkillsBonusCap(Decimal),

    #[error("hours per day must be positive, got {0}")]
    InvalidHoursPerDay(Decimal),

    #[error("monthly base hours must be positive, got {0}")]
    InvalidMonthlyBaseHours(Decimal),

    #[error("weeks per month must be non-negative, got {0}")]
    InvalidWeeksPerMonth(Decimal),

    #[error(
        "monthly base hours ({monthly_base_hours}) must cover a full-time month ({full_time_month})"
    )]
    MonthlyBaseHoursBelowFullTime {
        monthly_base_hours: Decimal,
        full_time_month: Decimal,
    },
}

/// Constants used by the rate formula.
///
/// [`RateEngineConfig::default`] carries the standard values; tests and
/// callers may tune them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateEngineConfig {
    /// Working weeks in a year (52).
    pub weeks_per_year: Decimal,

    /// Full-time hours in a week (40). Also the upper bound, exclusive, for
    /// weekly non-billable hours.
    pub hours_per_week: Decimal,

    /// Years of experience beyond which the experience bonus stops growing (10).
    pub experience_cap_years: Decimal,

    /// Bonus per year of experience (0.03).
    pub experience_step: Decimal,

    /// Bonus per selected skill (0.05).
    pub skills_bonus_step: Decimal,

    /// Upper bound for the skills bonus multiplier. `None` leaves it unbounded.
    pub skills_bonus_cap: Option<Decimal>,

    /// Billable hours in a day for the daily rate (8).
    pub hours_per_day: Decimal,

    /// Hours in a month before non-billable time is removed (160).
    pub monthly_base_hours: Decimal,

    /// Weeks per month used to scale weekly non-billable hours (4).
    pub weeks_per_month: Decimal,
}

impl Default for RateEngineConfig {
    fn default() -> Self {
        Self {
            weeks_per_year: Decimal::from(52),
            hours_per_week: Decimal::from(40),
            experience_cap_years: Decimal::from(10),
            experience_step: Decimal::new(3, 2),
            skills_bonus_step: Decimal::new(5, 2),
            skills_bonus_cap: None,
            hours_per_day: Decimal::from(8),
            monthly_base_hours: Decimal::from(160),
            weeks_per_month: Decimal::from(4),
        }
    }
}

impl RateEngineConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateEngineConfigError`] found.
    pub fn validate(&self) -> Result<(), RateEngineConfigError> {
        if self.weeks_per_year <= Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidWeeksPerYear(
                self.weeks_per_year,
            ));
        }
        if self.hours_per_week <= Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidHoursPerWeek(
                self.hours_per_week,
            ));
        }
        if self.experience_cap_years < Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidExperienceCap(
                self.experience_cap_years,
            ));
        }
        if self.experience_step < Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidExperienceStep(
                self.experience_step,
            ));
        }
        if self.skills_bonus_step < Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidSkillsBonusStep(
                self.skills_bonus_step,
            ));
        }
        if let Some(cap) = self.skills_bonus_cap.filter(|cap| *cap < Decimal::ONE) {
            return Err(RateEngineConfigError::InvalidSkillsBonusCap(cap));
        }
        if self.hours_per_day <= Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidHoursPerDay(
                self.hours_per_day,
            ));
        }
        if self.monthly_base_hours <= Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidMonthlyBaseHours(
                self.monthly_base_hours,
            ));
        }
        if self.weeks_per_month < Decimal::ZERO {
            return Err(RateEngineConfigError::InvalidWeeksPerMonth(
                self.weeks_per_month,
            ));
        }
        // Weekly non-billable hours stay below hours_per_week, so this keeps
        // the monthly billable hours positive.
        let full_time_month = self
            .hours_per_week
            .checked_mul(self.weeks_per_month)
            .unwrap_or(Decimal::MAX);
        if self.monthly_base_hours < full_time_month {
            return Err(RateEngineConfigError::MonthlyBaseHoursBelowFullTime {
                monthly_base_hours: self.monthly_base_hours,
                full_time_month,
            });
        }
        Ok(())
    }
}

/// Intermediate values of a calculation, unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub total_required_income: Decimal,
    pub billable_hours: Decimal,
    pub skill_multiplier: Decimal,
    pub experience_multiplier: Decimal,
    pub location_multiplier: Decimal,
    pub industry_multiplier: Decimal,
    pub skills_bonus: Decimal,
    /// Hourly rate before rounding. This is what the rate history records.
    pub hourly_rate: Decimal,
}

/// Output of [`RateEngine::calculate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCalculation {
    pub result: RateResult,
    pub breakdown: RateBreakdown,
}

/// The rate calculator. Holds only configuration; every call is pure.
#[derive(Debug, Clone, Default)]
pub struct RateEngine {
    config: RateEngineConfig,
}

impl RateEngine {
    /// Creates an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RateEngineConfigError`] if the configuration is invalid.
    pub fn new(config: RateEngineConfig) -> Result<Self, RateEngineConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RateEngineConfig {
        &self.config
    }

    /// Checks every input field independently and reports all failures.
    pub fn validate(
        &self,
        inputs: &RateInputs,
    ) -> Result<(), ValidationError> {
        self.required_fields(inputs).map(|_| ())
    }

    /// Runs every check and, when all pass, returns the required fields.
    fn required_fields(
        &self,
        inputs: &RateInputs,
    ) -> Result<(SkillLevel, Industry, Decimal), ValidationError> {
        let mut errors = ValidationError::new();

        if inputs.skill_level.is_none() {
            errors.push("skill_level", "Skill level is required");
        }
        if inputs.industry.is_none() {
            errors.push("industry", "Industry is required");
        }
        match inputs.desired_annual_income {
            None => errors.push(
                "desired_annual_income",
                "Desired annual income is required",
            ),
            Some(income) if income < Decimal::ZERO => errors.push(
                "desired_annual_income",
                "Desired annual income must be zero or more",
            ),
            Some(_) => {}
        }
        if inputs.tax_rate_percent < Decimal::ZERO
            || inputs.tax_rate_percent >= Decimal::ONE_HUNDRED
        {
            errors.push(
                "tax_rate_percent",
                "Tax rate must be at least 0 and less than 100",
            );
        }
        let max_hours = self.config.hours_per_week;
        if inputs.non_billable_hours_per_week < Decimal::ZERO
            || inputs.non_billable_hours_per_week >= max_hours
        {
            errors.push(
                "non_billable_hours_per_week",
                format!("Non-billable hours must be at least 0 and less than {max_hours}"),
            );
        }
        if inputs.experience_years < Decimal::ZERO {
            errors.push("experience_years", "Experience must be zero or more");
        }
        if inputs.annual_business_costs < Decimal::ZERO {
            errors.push(
                "annual_business_costs",
                "Business costs must be zero or more",
            );
        }

        match (
            inputs.skill_level,
            inputs.industry,
            inputs.desired_annual_income,
        ) {
            (Some(skill_level), Some(industry), Some(income)) if errors.is_empty() => {
                Ok((skill_level, industry, income))
            }
            _ => Err(errors),
        }
    }

    /// Validates the inputs and computes the rounded rates plus the
    /// unrounded breakdown.
    ///
    /// # Errors
    ///
    /// * [`RateEngineError::Validation`] listing every failing field.
    /// * [`RateEngineError::NonPositiveBillableHours`] if the working year has
    ///   no billable time.
    /// * [`RateEngineError::Overflow`] if the inputs are too large for the
    ///   decimal range.
    pub fn calculate(
        &self,
        inputs: &RateInputs,
    ) -> Result<RateCalculation, RateEngineError> {
        let (skill_level, industry, income) = self.required_fields(inputs)?;

        let total_required_income = self.total_required_income(
            income,
            inputs.annual_business_costs,
            inputs.tax_rate_percent,
        )?;
        let billable_hours = self.billable_hours(inputs.non_billable_hours_per_week)?;

        let skill_multiplier = skill_level.multiplier();
        let experience_multiplier = self.experience_multiplier(inputs.experience_years)?;
        let location_multiplier = inputs
            .location
            .map_or(Decimal::ONE, |location| location.multiplier());
        let industry_multiplier = industry.multiplier();
        let skills_bonus = self.skills_bonus(inputs.selected_skills.len())?;

        let hourly_rate = total_required_income
            .checked_div(billable_hours)
            .and_then(|base| {
                [
                    skill_multiplier,
                    experience_multiplier,
                    location_multiplier,
                    industry_multiplier,
                    skills_bonus,
                ]
                .into_iter()
                .try_fold(base, Decimal::checked_mul)
            })
            .ok_or(RateEngineError::Overflow("hourly rate"))?;

        let result = RateResult {
            hourly: round_half_up(hourly_rate),
            daily: round_half_up(self.daily_rate(hourly_rate)?),
            monthly: round_half_up(
                self.monthly_rate(hourly_rate, inputs.non_billable_hours_per_week)?,
            ),
            currency: inputs.currency,
        };

        debug!(
            hourly = %result.hourly,
            currency = %result.currency,
            %billable_hours,
            "rate calculated"
        );

        Ok(RateCalculation {
            result,
            breakdown: RateBreakdown {
                total_required_income,
                billable_hours,
                skill_multiplier,
                experience_multiplier,
                location_multiplier,
                industry_multiplier,
                skills_bonus,
                hourly_rate,
            },
        })
    }

    /// Income plus costs plus tax on the income.
    fn total_required_income(
        &self,
        income: Decimal,
        business_costs: Decimal,
        tax_rate_percent: Decimal,
    ) -> Result<Decimal, RateEngineError> {
        let tax = income.checked_mul(tax_rate_percent / Decimal::ONE_HUNDRED);
        income
            .checked_add(business_costs)
            .zip(tax)
            .and_then(|(before_tax, tax)| before_tax.checked_add(tax))
            .ok_or(RateEngineError::Overflow("total required income"))
    }

    /// Hours left for client work in a year.
    fn billable_hours(
        &self,
        non_billable_hours_per_week: Decimal,
    ) -> Result<Decimal, RateEngineError> {
        let weeks = self.config.weeks_per_year;
        let hours = weeks
            .checked_mul(self.config.hours_per_week)
            .zip(weeks.checked_mul(non_billable_hours_per_week))
            .and_then(|(full_time, overhead)| full_time.checked_sub(overhead))
            .ok_or(RateEngineError::Overflow("billable hours"))?;
        if hours <= Decimal::ZERO {
            return Err(RateEngineError::NonPositiveBillableHours(hours));
        }
        Ok(hours)
    }

    fn experience_multiplier(
        &self,
        experience_years: Decimal,
    ) -> Result<Decimal, RateEngineError> {
        let years = experience_years.min(self.config.experience_cap_years);
        years
            .checked_mul(self.config.experience_step)
            .and_then(|bonus| Decimal::ONE.checked_add(bonus))
            .ok_or(RateEngineError::Overflow("experience multiplier"))
    }

    fn skills_bonus(
        &self,
        skill_count: usize,
    ) -> Result<Decimal, RateEngineError> {
        let bonus = Decimal::from(skill_count)
            .checked_mul(self.config.skills_bonus_step)
            .and_then(|bonus| Decimal::ONE.checked_add(bonus))
            .ok_or(RateEngineError::Overflow("skills bonus"))?;
        Ok(match self.config.skills_bonus_cap {
            Some(cap) => bonus.min(cap),
            None => bonus,
        })
    }

    fn daily_rate(
        &self,
        hourly_rate: Decimal,
    ) -> Result<Decimal, RateEngineError> {
        hourly_rate
            .checked_mul(self.config.hours_per_day)
            .ok_or(RateEngineError::Overflow("daily rate"))
    }

    fn monthly_rate(
        &self,
        hourly_rate: Decimal,
        non_billable_hours_per_week: Decimal,
    ) -> Result<Decimal, RateEngineError> {
        non_billable_hours_per_week
            .checked_mul(self.config.weeks_per_month)
            .and_then(|overhead| self.config.monthly_base_hours.checked_sub(overhead))
            .and_then(|hours| hourly_rate.checked_mul(hours))
            .ok_or(RateEngineError::Overflow("monthly rate"))
    }
}

/// Computes the rounded rates with the default configuration.
///
/// # Errors
///
/// See [`RateEngine::calculate`].
pub fn compute_rate(inputs: &RateInputs) -> Result<RateResult, RateEngineError> {
    RateEngine::default()
        .calculate(inputs)
        .map(|calculation| calculation.result)
}

/// Converts an hourly rate in `currency` to its US dollar equivalent.
/// Returns `None` when the result does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rate_core::Currency;
/// use rate_core::calculations::normalize_for_comparison;
///
/// assert_eq!(normalize_for_comparison(dec!(80), Currency::Usd), Some(dec!(80)));
/// assert_eq!(normalize_for_comparison(dec!(83), Currency::Inr), Some(dec!(1)));
/// ```
pub fn normalize_for_comparison(
    hourly_rate: Decimal,
    currency: Currency,
) -> Option<Decimal> {
    hourly_rate.checked_div(currency.rate_relative_to_usd())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Location;

    fn baseline_inputs() -> RateInputs {
        RateInputs {
            skill_level: Some(SkillLevel::Intermediate),
            industry: Some(Industry::WebDevelopment),
            location: Some(Location::NorthAmerica),
            experience_years: dec!(0),
            desired_annual_income: Some(dec!(104000)),
            annual_business_costs: dec!(0),
            tax_rate_percent: dec!(0),
            non_billable_hours_per_week: dec!(0),
            currency: Currency::Usd,
            selected_skills: BTreeSet::new(),
        }
    }

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_baseline_example() {
        let engine = RateEngine::default();

        let calculation = engine.calculate(&baseline_inputs()).unwrap();

        assert_eq!(calculation.breakdown.billable_hours, dec!(2080));
        assert_eq!(
            calculation.result,
            RateResult {
                hourly: dec!(62.50),
                daily: dec!(500.00),
                monthly: dec!(10000.00),
                currency: Currency::Usd,
            }
        );
    }

    #[test]
    fn calculate_applies_every_multiplier() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            skill_level: Some(SkillLevel::Expert),
            industry: Some(Industry::DataScience),
            location: Some(Location::WesternEurope),
            experience_years: dec!(5),
            desired_annual_income: Some(dec!(80000)),
            annual_business_costs: dec!(6000),
            tax_rate_percent: dec!(25),
            non_billable_hours_per_week: dec!(10),
            currency: Currency::Eur,
            selected_skills: skills(&["Python", "SQL"]),
        };

        let calculation = engine.calculate(&inputs).unwrap();
        let breakdown = &calculation.breakdown;

        // 80000 + 6000 + 20000
        assert_eq!(breakdown.total_required_income, dec!(106000));
        // 2080 - 520
        assert_eq!(breakdown.billable_hours, dec!(1560));
        assert_eq!(breakdown.skill_multiplier, dec!(1.5));
        assert_eq!(breakdown.experience_multiplier, dec!(1.15));
        assert_eq!(breakdown.location_multiplier, dec!(0.95));
        assert_eq!(breakdown.industry_multiplier, dec!(1.25));
        assert_eq!(breakdown.skills_bonus, dec!(1.10));

        // (106000 / 1560) × 1.5 × 1.15 × 0.95 × 1.25 × 1.10 = 153.1075...
        assert_eq!(calculation.result.hourly, dec!(153.11));
        assert_eq!(calculation.result.daily, dec!(1224.86));
        // hourly × (160 - 40)
        assert_eq!(calculation.result.monthly, dec!(18372.91));
        assert_eq!(calculation.result.currency, Currency::Eur);
    }

    #[test]
    fn calculate_without_location_uses_neutral_multiplier() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            location: None,
            ..baseline_inputs()
        };

        let calculation = engine.calculate(&inputs).unwrap();

        assert_eq!(calculation.breakdown.location_multiplier, Decimal::ONE);
        assert_eq!(calculation.result.hourly, dec!(62.50));
    }

    #[test]
    fn calculate_rounds_only_final_values() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            desired_annual_income: Some(dec!(100000)),
            skill_level: Some(SkillLevel::Beginner),
            ..baseline_inputs()
        };

        let calculation = engine.calculate(&inputs).unwrap();

        // 100000 / 2080 = 48.0769230...
        assert!(calculation.breakdown.hourly_rate > dec!(48.0769));
        assert!(calculation.breakdown.hourly_rate < dec!(48.0770));
        assert_eq!(calculation.result.hourly, dec!(48.08));
        // 48.0769230... × 8 = 384.615..., not 48.08 × 8 = 384.64
        assert_eq!(calculation.result.daily, dec!(384.62));
        // 48.0769230... × 160 = 7692.307..., not 48.08 × 160 = 7692.80
        assert_eq!(calculation.result.monthly, dec!(7692.31));
    }

    #[test]
    fn calculate_is_deterministic() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            experience_years: dec!(3),
            selected_skills: skills(&["React"]),
            ..baseline_inputs()
        };

        let first = engine.calculate(&inputs).unwrap();
        let second = engine.calculate(&inputs).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn calculate_zero_income_yields_zero_rates() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            desired_annual_income: Some(dec!(0)),
            ..baseline_inputs()
        };

        let result = engine.calculate(&inputs).unwrap().result;

        assert_eq!(result.hourly, dec!(0));
        assert_eq!(result.monthly, dec!(0));
    }

    #[test]
    fn calculate_positive_income_yields_positive_rate() {
        let engine = RateEngine::default();

        for level in SkillLevel::all() {
            for industry in Industry::all() {
                for location in Location::all() {
                    let inputs = RateInputs {
                        skill_level: Some(*level),
                        industry: Some(*industry),
                        location: Some(*location),
                        non_billable_hours_per_week: dec!(39.5),
                        desired_annual_income: Some(dec!(1000)),
                        ..baseline_inputs()
                    };

                    let calculation = engine.calculate(&inputs).unwrap();

                    assert!(calculation.breakdown.billable_hours > Decimal::ZERO);
                    assert!(calculation.breakdown.hourly_rate > Decimal::ZERO);
                }
            }
        }
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn validate_reports_every_failing_field() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            skill_level: None,
            industry: None,
            desired_annual_income: None,
            tax_rate_percent: dec!(120),
            non_billable_hours_per_week: dec!(-1),
            ..baseline_inputs()
        };

        let err = engine.validate(&inputs).unwrap_err();

        assert_eq!(err.len(), 5);
        for field in [
            "skill_level",
            "industry",
            "desired_annual_income",
            "tax_rate_percent",
            "non_billable_hours_per_week",
        ] {
            assert!(err.has_field(field), "missing error for {field}");
        }
    }

    #[test]
    fn validate_rejects_negative_income() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            desired_annual_income: Some(dec!(-1)),
            ..baseline_inputs()
        };

        let err = engine.validate(&inputs).unwrap_err();

        assert!(err.has_field("desired_annual_income"));
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn validate_rejects_forty_non_billable_hours() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            non_billable_hours_per_week: dec!(40),
            ..baseline_inputs()
        };

        let result = engine.calculate(&inputs);

        match result {
            Err(RateEngineError::Validation(err)) => {
                assert!(err.has_field("non_billable_hours_per_week"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_just_under_forty_non_billable_hours() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            non_billable_hours_per_week: dec!(39.99),
            ..baseline_inputs()
        };

        assert!(engine.calculate(&inputs).is_ok());
    }

    #[test]
    fn validate_rejects_one_hundred_percent_tax() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            tax_rate_percent: dec!(100),
            ..baseline_inputs()
        };

        let err = engine.validate(&inputs).unwrap_err();

        assert!(err.has_field("tax_rate_percent"));
    }

    #[test]
    fn validate_rejects_negative_experience_and_costs() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            experience_years: dec!(-2),
            annual_business_costs: dec!(-100),
            ..baseline_inputs()
        };

        let err = engine.validate(&inputs).unwrap_err();

        assert!(err.has_field("experience_years"));
        assert!(err.has_field("annual_business_costs"));
    }

    // =========================================================================
    // step tests
    // =========================================================================

    #[test]
    fn total_required_income_adds_costs_and_tax() {
        let engine = RateEngine::default();

        let result = engine.total_required_income(dec!(50000), dec!(5000), dec!(20));

        assert_eq!(result, Ok(dec!(65000)));
    }

    #[test]
    fn billable_hours_subtracts_weekly_overhead() {
        let engine = RateEngine::default();

        assert_eq!(engine.billable_hours(dec!(0)), Ok(dec!(2080)));
        assert_eq!(engine.billable_hours(dec!(10)), Ok(dec!(1560)));
    }

    #[test]
    fn billable_hours_guard_rejects_full_overhead() {
        let engine = RateEngine::default();

        assert_eq!(
            engine.billable_hours(dec!(40)),
            Err(RateEngineError::NonPositiveBillableHours(dec!(0)))
        );
        assert_eq!(
            engine.billable_hours(dec!(45)),
            Err(RateEngineError::NonPositiveBillableHours(dec!(-260)))
        );
    }

    #[test]
    fn experience_multiplier_caps_at_ten_years() {
        let engine = RateEngine::default();

        assert_eq!(engine.experience_multiplier(dec!(0)), Ok(dec!(1)));
        assert_eq!(engine.experience_multiplier(dec!(10)), Ok(dec!(1.30)));
        assert_eq!(engine.experience_multiplier(dec!(11)), Ok(dec!(1.30)));
        assert_eq!(engine.experience_multiplier(dec!(40)), Ok(dec!(1.30)));
    }

    #[test]
    fn experience_beyond_cap_does_not_change_rate() {
        let engine = RateEngine::default();
        let at_cap = RateInputs {
            experience_years: dec!(10),
            ..baseline_inputs()
        };
        let past_cap = RateInputs {
            experience_years: dec!(11),
            ..baseline_inputs()
        };

        assert_eq!(
            engine.calculate(&at_cap).unwrap().result,
            engine.calculate(&past_cap).unwrap().result
        );
    }

    #[test]
    fn skills_bonus_is_unbounded_by_default() {
        let engine = RateEngine::default();

        assert_eq!(engine.skills_bonus(0), Ok(dec!(1)));
        assert_eq!(engine.skills_bonus(3), Ok(dec!(1.15)));
        assert_eq!(engine.skills_bonus(40), Ok(dec!(3.00)));
    }

    #[test]
    fn skills_bonus_respects_configured_cap() {
        let engine = RateEngine::new(RateEngineConfig {
            skills_bonus_cap: Some(dec!(1.25)),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(engine.skills_bonus(2), Ok(dec!(1.10)));
        assert_eq!(engine.skills_bonus(10), Ok(dec!(1.25)));
    }

    #[test]
    fn monthly_rate_removes_non_billable_time() {
        let engine = RateEngine::default();

        assert_eq!(engine.monthly_rate(dec!(50), dec!(5)), Ok(dec!(7000)));
    }

    // =========================================================================
    // overflow tests
    // =========================================================================

    #[test]
    fn calculate_reports_overflow_for_huge_income() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            skill_level: Some(SkillLevel::Expert),
            industry: Some(Industry::Consulting),
            desired_annual_income: Some(Decimal::MAX),
            tax_rate_percent: dec!(50),
            ..baseline_inputs()
        };

        assert_eq!(
            engine.calculate(&inputs),
            Err(RateEngineError::Overflow("total required income"))
        );
    }

    #[test]
    fn calculate_reports_overflow_when_costs_push_past_range() {
        let engine = RateEngine::default();
        let inputs = RateInputs {
            desired_annual_income: Some(Decimal::MAX),
            annual_business_costs: dec!(1),
            ..baseline_inputs()
        };

        assert!(matches!(
            engine.calculate(&inputs),
            Err(RateEngineError::Overflow(_))
        ));
    }

    #[test]
    fn daily_rate_reports_overflow() {
        let engine = RateEngine::default();

        assert_eq!(
            engine.daily_rate(Decimal::MAX),
            Err(RateEngineError::Overflow("daily rate"))
        );
    }

    // =========================================================================
    // config tests
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RateEngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn config_rejects_zero_weeks() {
        let config = RateEngineConfig {
            weeks_per_year: dec!(0),
            ..Default::default()
        };

        assert_eq!(
            RateEngine::new(config).unwrap_err(),
            RateEngineConfigError::InvalidWeeksPerYear(dec!(0))
        );
    }

    #[test]
    fn config_rejects_cap_below_one() {
        let config = RateEngineConfig {
            skills_bonus_cap: Some(dec!(0.9)),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(RateEngineConfigError::InvalidSkillsBonusCap(dec!(0.9)))
        );
    }

    #[test]
    fn config_rejects_zero_monthly_base_hours() {
        let config = RateEngineConfig {
            monthly_base_hours: dec!(0),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(RateEngineConfigError::InvalidMonthlyBaseHours(dec!(0)))
        );
    }

    #[test]
    fn config_rejects_negative_weeks_per_month() {
        let config = RateEngineConfig {
            weeks_per_month: dec!(-1),
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(RateEngineConfigError::InvalidWeeksPerMonth(dec!(-1)))
        );
    }

    #[test]
    fn config_rejects_week_longer_than_monthly_base() {
        let config = RateEngineConfig {
            hours_per_week: dec!(60),
            ..Default::default()
        };

        assert_eq!(
            RateEngine::new(config).unwrap_err(),
            RateEngineConfigError::MonthlyBaseHoursBelowFullTime {
                monthly_base_hours: dec!(160),
                full_time_month: dec!(240),
            }
        );
    }

    #[test]
    fn valid_custom_config_keeps_monthly_rate_positive() {
        let engine = RateEngine::new(RateEngineConfig {
            hours_per_week: dec!(60),
            monthly_base_hours: dec!(240),
            ..Default::default()
        })
        .unwrap();
        let inputs = RateInputs {
            non_billable_hours_per_week: dec!(59),
            ..baseline_inputs()
        };

        let result = engine.calculate(&inputs).unwrap().result;

        assert!(result.monthly > Decimal::ZERO);
        assert!(result.hourly > Decimal::ZERO);
    }

    // =========================================================================
    // free function tests
    // =========================================================================

    #[test]
    fn compute_rate_returns_rounded_result() {
        let result = compute_rate(&baseline_inputs()).unwrap();

        assert_eq!(result.hourly, dec!(62.50));
    }

    #[test]
    fn normalize_for_comparison_is_identity_for_usd() {
        assert_eq!(
            normalize_for_comparison(dec!(62.50), Currency::Usd),
            Some(dec!(62.50))
        );
    }

    #[test]
    fn normalize_for_comparison_divides_by_exchange_rate() {
        assert_eq!(
            normalize_for_comparison(dec!(92), Currency::Eur),
            Some(dec!(100))
        );
        assert_eq!(
            normalize_for_comparison(dec!(15000), Currency::Jpy),
            Some(dec!(100))
        );
    }

    #[test]
    fn normalize_for_comparison_overflow_is_none() {
        assert_eq!(normalize_for_comparison(Decimal::MAX, Currency::Gbp), None);
    }
}
