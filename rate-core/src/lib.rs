//! Freelance rate estimation: the rate engine, budget comparison, market
//! trends, an income/expense ledger and storage traits.

pub mod calculations;
pub mod db;
pub mod history;
pub mod market;
pub mod models;
pub mod tips;

pub use db::repository::{FreelanceRepository, RepositoryError};
pub use models::*;
