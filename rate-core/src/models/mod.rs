mod currency;
mod industry;
mod location;
mod rate_inputs;
mod rate_result;
mod saved_calculation;
mod skill_level;
mod transaction;
mod unknown_key;

pub use currency::{Currency, CurrencyProfile};
pub use industry::{Industry, IndustryProfile};
pub use location::Location;
pub use rate_inputs::RateInputs;
pub use rate_result::RateResult;
pub use saved_calculation::SavedCalculation;
pub use skill_level::SkillLevel;
pub use transaction::{NewTransaction, Transaction, TransactionKind};
pub use unknown_key::UnknownKeyError;
