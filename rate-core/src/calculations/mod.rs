//! Pricing and bookkeeping calculations.
//!
//! Every function here is pure: no I/O, no clocks, no shared state.

pub mod budget;
pub mod common;
pub mod ledger;
pub mod rate_engine;
pub mod validation;

pub use budget::{BudgetComparison, RateBand, band_thresholds, classify_rate, compare_budget};
pub use ledger::{Ledger, LedgerError, LedgerSummary, TransactionFilter, validate_transaction};
pub use rate_engine::{
    RateBreakdown, RateCalculation, RateEngine, RateEngineConfig, RateEngineConfigError,
    RateEngineError, compute_rate, normalize_for_comparison,
};
pub use validation::{FieldError, ValidationError};
