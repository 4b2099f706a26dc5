//! Client budget comparison.
//!
//! A client's budget divided by the estimated project hours gives an
//! effective hourly rate, which is placed in a [`RateBand`] using static
//! per-currency thresholds.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Currency;
use crate::calculations::common::round_half_up;
use crate::calculations::rate_engine::normalize_for_comparison;
use crate::calculations::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateBand {
    VeryLow,
    BelowAverage,
    Average,
    AboveAverage,
    Premium,
}

impl RateBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::BelowAverage => "below average",
            Self::Average => "average",
            Self::AboveAverage => "above average",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for RateBand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds, in the currency itself, of the below-average, average,
/// above-average and premium bands.
pub fn band_thresholds(currency: Currency) -> [Decimal; 4] {
    let whole = |values: [i64; 4]| values.map(Decimal::from);
    match currency {
        Currency::Usd => whole([25, 50, 100, 150]),
        Currency::Eur => whole([23, 46, 92, 138]),
        Currency::Gbp => whole([20, 40, 80, 120]),
        Currency::Cad => whole([34, 68, 136, 204]),
        Currency::Aud => whole([38, 76, 152, 228]),
        Currency::Inr => whole([2000, 4000, 8000, 12000]),
        Currency::Jpy => whole([3750, 7500, 15000, 22500]),
    }
}

/// Places an hourly rate in its band for `currency`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rate_core::Currency;
/// use rate_core::calculations::{RateBand, classify_rate};
///
/// assert_eq!(classify_rate(dec!(49.99), Currency::Usd), RateBand::BelowAverage);
/// assert_eq!(classify_rate(dec!(50), Currency::Usd), RateBand::Average);
/// ```
pub fn classify_rate(
    hourly_rate: Decimal,
    currency: Currency,
) -> RateBand {
    let [below_average, average, above_average, premium] = band_thresholds(currency);
    if hourly_rate < below_average {
        RateBand::VeryLow
    } else if hourly_rate < average {
        RateBand::BelowAverage
    } else if hourly_rate < above_average {
        RateBand::Average
    } else if hourly_rate < premium {
        RateBand::AboveAverage
    } else {
        RateBand::Premium
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub budget: Decimal,
    pub project_hours: Decimal,
    /// Effective hourly rate, rounded to cents.
    pub hourly_rate: Decimal,
    pub currency: Currency,
    /// Effective hourly rate in US dollars, rounded to cents.
    pub usd_equivalent: Decimal,
    pub band: RateBand,
}

impl fmt::Display for BudgetComparison {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let symbol = self.currency.symbol();
        write!(
            f,
            "The client's budget of {symbol}{} for {} hours results in an hourly rate of {symbol}{:.2}. This is {} for {}.",
            self.budget, self.project_hours, self.hourly_rate, self.band, self.currency
        )
    }
}

/// Compares a client's budget against the market bands.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every failing field if the budget is
/// negative or the hours are not positive, or if the effective rate is too
/// large to represent.
pub fn compare_budget(
    budget: Decimal,
    project_hours: Decimal,
    currency: Currency,
) -> Result<BudgetComparison, ValidationError> {
    let mut errors = ValidationError::new();
    if budget < Decimal::ZERO {
        errors.push("budget", "Budget must be zero or more");
    }
    if project_hours <= Decimal::ZERO {
        errors.push("project_hours", "Project hours must be greater than 0");
    }
    errors.into_result()?;

    let rates = budget.checked_div(project_hours).and_then(|hourly_rate| {
        normalize_for_comparison(hourly_rate, currency).map(|usd| (hourly_rate, usd))
    });
    let Some((hourly_rate, usd_equivalent)) = rates else {
        let mut errors = ValidationError::new();
        errors.push("budget", "Budget is too large for the project hours");
        return Err(errors);
    };

    Ok(BudgetComparison {
        budget,
        project_hours,
        hourly_rate: round_half_up(hourly_rate),
        currency,
        usd_equivalent: round_half_up(usd_equivalent),
        band: classify_rate(hourly_rate, currency),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn thresholds_ascend_for_every_currency() {
        for currency in Currency::all() {
            let t = band_thresholds(*currency);
            assert!(t.windows(2).all(|w| w[0] < w[1]), "{currency}");
        }
    }

    #[test]
    fn classify_rate_band_boundaries() {
        let usd = Currency::Usd;

        assert_eq!(classify_rate(dec!(0), usd), RateBand::VeryLow);
        assert_eq!(classify_rate(dec!(24.99), usd), RateBand::VeryLow);
        assert_eq!(classify_rate(dec!(25), usd), RateBand::BelowAverage);
        assert_eq!(classify_rate(dec!(99.99), usd), RateBand::Average);
        assert_eq!(classify_rate(dec!(100), usd), RateBand::AboveAverage);
        assert_eq!(classify_rate(dec!(150), usd), RateBand::Premium);
    }

    #[test]
    fn classify_rate_uses_currency_table() {
        // 5000 INR/hour is about 60 USD
        assert_eq!(classify_rate(dec!(5000), Currency::Inr), RateBand::Average);
        assert_eq!(classify_rate(dec!(5000), Currency::Usd), RateBand::Premium);
    }

    #[test]
    fn compare_budget_computes_effective_rate() {
        let comparison = compare_budget(dec!(3000), dec!(40), Currency::Usd).unwrap();

        assert_eq!(comparison.hourly_rate, dec!(75.00));
        assert_eq!(comparison.usd_equivalent, dec!(75.00));
        assert_eq!(comparison.band, RateBand::Average);
    }

    #[test]
    fn compare_budget_normalizes_foreign_currency() {
        let comparison = compare_budget(dec!(4600), dec!(50), Currency::Eur).unwrap();

        assert_eq!(comparison.hourly_rate, dec!(92.00));
        assert_eq!(comparison.usd_equivalent, dec!(100.00));
        assert_eq!(comparison.band, RateBand::AboveAverage);
    }

    #[test]
    fn compare_budget_rounds_repeating_rate() {
        let comparison = compare_budget(dec!(1000), dec!(3), Currency::Usd).unwrap();

        assert_eq!(comparison.hourly_rate, dec!(333.33));
        assert_eq!(comparison.band, RateBand::Premium);
    }

    #[test]
    fn compare_budget_reports_all_invalid_fields() {
        let err = compare_budget(dec!(-5), dec!(0), Currency::Usd).unwrap_err();

        assert!(err.has_field("budget"));
        assert!(err.has_field("project_hours"));
    }

    #[test]
    fn compare_budget_rejects_rate_past_decimal_range() {
        let err = compare_budget(Decimal::MAX, dec!(0.5), Currency::Usd).unwrap_err();

        assert!(err.has_field("budget"));
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn comparison_message_names_band() {
        let comparison = compare_budget(dec!(1000), dec!(40), Currency::Usd).unwrap();

        assert_eq!(
            comparison.to_string(),
            "The client's budget of $1000 for 40 hours results in an hourly rate of $25.00. This is below average for USD."
        );
    }
}
