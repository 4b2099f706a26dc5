use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RateInputs, RateResult};

/// A calculation the user chose to keep, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub inputs: RateInputs,
    pub results: RateResult,
    pub date: DateTime<Utc>,
}
