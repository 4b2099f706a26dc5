use anyhow::{Context, Result};
use rate_core::calculations::RateEngine;
use rate_core::db::RepositoryRegistry;
use rate_db_sqlite::SqliteRepositoryFactory;
use tracing::debug;

use crate::config::AppConfig;
use crate::market_source::market_source;
use crate::state::AppState;

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Opens the configured store and assembles the session state.
pub async fn open_state(config: &AppConfig) -> Result<AppState> {
    let engine = RateEngine::new(config.engine.clone()).context("invalid [engine] configuration")?;

    let db_config = config.database.db_config();
    debug!("connecting to {} backend", db_config.backend);
    let repo = build_registry()
        .create(&db_config)
        .await
        .with_context(|| format!("cannot open store '{}'", db_config.connection_string))?;

    Ok(AppState::new(engine, repo, market_source(&config.market)))
}
