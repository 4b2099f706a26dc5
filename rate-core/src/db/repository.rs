use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTransaction, SavedCalculation, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Storage for saved calculations and ledger transactions.
///
/// Both collections keep insertion order.
#[async_trait]
pub trait FreelanceRepository: Send + Sync {
    // Saved calculations
    async fn list_saved_calculations(&self) -> Result<Vec<SavedCalculation>, RepositoryError>;

    async fn save_calculation(
        &self,
        calculation: SavedCalculation,
    ) -> Result<(), RepositoryError>;

    /// Removes the calculation at `index` in [`Self::list_saved_calculations`] order.
    async fn delete_saved_calculation(
        &self,
        index: usize,
    ) -> Result<SavedCalculation, RepositoryError>;

    async fn clear_saved_calculations(&self) -> Result<(), RepositoryError>;

    // Transactions
    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepositoryError>;

    /// Stores a transaction under the next free id.
    async fn add_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, RepositoryError>;

    async fn delete_transaction(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;
}

/// The id given to the next transaction: one past the largest in use.
pub fn next_transaction_id(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
}
