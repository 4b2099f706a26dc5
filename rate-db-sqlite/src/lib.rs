//! SQLite storage for saved calculations and ledger transactions.

mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::{SAVED_CALCULATIONS_KEY, SqliteRepository, TRANSACTIONS_KEY};
