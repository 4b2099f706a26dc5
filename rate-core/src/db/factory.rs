//! Choosing where saved calculations and the ledger live.
//!
//! The command line front end registers every store it was built with and
//! opens the one named in `[database] backend`.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{FreelanceRepository, RepositoryError};

/// Which store to open and how to reach it.
///
/// | backend  | connection_string                 |
/// |----------|-----------------------------------|
/// | `sqlite` | `freelance-rates.db`, `:memory:`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    /// Handed to the store as is; a file path for SQLite.
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Opens one kind of store for saved calculations and transactions.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Name used in `[database] backend` and `--backend`.
    fn backend_name(&self) -> &'static str;

    /// Opens the store, creating and migrating it if needed.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FreelanceRepository>, RepositoryError>;
}

/// Stores known to this build, by backend name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations under the same name win.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the store named by `config.backend`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] when the backend is not
    /// registered, otherwise whatever the store returns while opening.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FreelanceRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "no '{}' store in this build (known: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };
        factory.create(config).await
    }
}
