//! Rounding shared by every calculation that produces a displayed amount.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rate_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(62.504)), dec!(62.50));
/// assert_eq!(round_half_up(dec!(62.505)), dec!(62.51));
/// assert_eq!(round_half_up(dec!(-62.505)), dec!(-62.51)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
