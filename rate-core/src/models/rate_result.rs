use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// Rounded rates, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResult {
    pub hourly: Decimal,
    pub daily: Decimal,
    pub monthly: Decimal,
    pub currency: Currency,
}
