use std::str::FromStr;

use async_trait::async_trait;
use rate_core::db::next_transaction_id;
use rate_core::{FreelanceRepository, NewTransaction, RepositoryError, SavedCalculation, Transaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqliteConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// Key of the JSON array of saved calculations.
pub const SAVED_CALCULATIONS_KEY: &str = "savedCalculations";
/// Key of the JSON array of ledger transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";

const MEMORY: &str = ":memory:";

/// A key/value store in SQLite where each collection is one JSON array.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens the database at `connection_string`.
    ///
    /// Accepts `:memory:`, a `sqlite:` URL or a bare file path. Files are
    /// created if missing.
    pub async fn new(connection_string: &str) -> Result<Self, RepositoryError> {
        let (options, max_connections) = if connection_string == MEMORY {
            (parse_url("sqlite::memory:")?, 1)
        } else if connection_string.starts_with("sqlite:") {
            (parse_url(connection_string)?.create_if_missing(true), 4)
        } else {
            (
                SqliteConnectOptions::new()
                    .filename(connection_string)
                    .create_if_missing(true),
                4,
            )
        };

        // Each in-memory connection is a separate database, so keep one.
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                RepositoryError::Connection(format!(
                    "failed to open database '{connection_string}': {e}"
                ))
            })?;

        info!(database = connection_string, "Opened SQLite store");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("failed to run migrations: {e}")))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn read_all<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Vec<T>, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(database_error)?;
        load(&mut conn, key).await
    }

    /// Loads `key`, applies `update` and writes the array back in one
    /// database transaction.
    async fn modify<T, R>(
        &self,
        key: &str,
        update: impl FnOnce(&mut Vec<T>) -> Result<R, RepositoryError> + Send,
    ) -> Result<R, RepositoryError>
    where
        T: Serialize + DeserializeOwned + Send,
        R: Send,
    {
        let mut tx = self.pool.begin().await.map_err(database_error)?;
        let mut items = load(&mut tx, key).await?;
        let outcome = update(&mut items)?;
        store(&mut tx, key, &items).await?;
        tx.commit().await.map_err(database_error)?;

        debug!(key, len = items.len(), "Stored collection");
        Ok(outcome)
    }
}

fn parse_url(url: &str) -> Result<SqliteConnectOptions, RepositoryError> {
    SqliteConnectOptions::from_str(url)
        .map_err(|e| RepositoryError::Configuration(format!("invalid SQLite URL '{url}': {e}")))
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

/// A missing key reads as an empty collection.
async fn load<T: DeserializeOwned>(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Vec<T>, RepositoryError> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await
        .map_err(database_error)?;

    match value {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

async fn store<T: Serialize>(
    conn: &mut SqliteConnection,
    key: &str,
    items: &[T],
) -> Result<(), RepositoryError> {
    let json = serde_json::to_string(items)?;
    sqlx::query(
        "INSERT INTO kv_store (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(json)
    .execute(&mut *conn)
    .await
    .map_err(database_error)?;
    Ok(())
}

#[async_trait]
impl FreelanceRepository for SqliteRepository {
    async fn list_saved_calculations(&self) -> Result<Vec<SavedCalculation>, RepositoryError> {
        self.read_all(SAVED_CALCULATIONS_KEY).await
    }

    async fn save_calculation(
        &self,
        calculation: SavedCalculation,
    ) -> Result<(), RepositoryError> {
        self.modify(SAVED_CALCULATIONS_KEY, |saved: &mut Vec<SavedCalculation>| {
            saved.push(calculation);
            Ok(())
        })
        .await
    }

    async fn delete_saved_calculation(
        &self,
        index: usize,
    ) -> Result<SavedCalculation, RepositoryError> {
        self.modify(SAVED_CALCULATIONS_KEY, |saved: &mut Vec<SavedCalculation>| {
            if index < saved.len() {
                Ok(saved.remove(index))
            } else {
                Err(RepositoryError::NotFound)
            }
        })
        .await
    }

    async fn clear_saved_calculations(&self) -> Result<(), RepositoryError> {
        self.modify(SAVED_CALCULATIONS_KEY, |saved: &mut Vec<SavedCalculation>| {
            saved.clear();
            Ok(())
        })
        .await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepositoryError> {
        self.read_all(TRANSACTIONS_KEY).await
    }

    async fn add_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, RepositoryError> {
        self.modify(TRANSACTIONS_KEY, |transactions: &mut Vec<Transaction>| {
            let stored = transaction.with_id(next_transaction_id(transactions));
            transactions.push(stored.clone());
            Ok(stored)
        })
        .await
    }

    async fn delete_transaction(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        self.modify(TRANSACTIONS_KEY, |transactions: &mut Vec<Transaction>| {
            let position = transactions
                .iter()
                .position(|t| t.id == id)
                .ok_or(RepositoryError::NotFound)?;
            transactions.remove(position);
            Ok(())
        })
        .await
    }
}
