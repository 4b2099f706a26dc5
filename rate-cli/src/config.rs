//! Settings loaded from `freelance-rates.toml`.
//!
//! Every section is optional; missing values take their defaults. Command
//! line flags override whatever the file says.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! path = "freelance-rates.db"
//!
//! [defaults]
//! currency = "EUR"
//! location = "western-europe"
//! tax_rate_percent = 25
//! non_billable_hours_per_week = 8
//!
//! [engine]
//! skills_bonus_cap = 1.25
//!
//! [logging]
//! level = "info"
//! file = "freelance-rates.log"
//!
//! [market]
//! region = "Global"
//! response_file = "market-response.json"
//! ```

use std::path::{Path, PathBuf};

use rate_core::calculations::RateEngineConfig;
use rate_core::db::DbConfig;
use rate_core::{Currency, Location};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File read when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "freelance-rates.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub defaults: DefaultsConfig,
    pub engine: RateEngineConfig,
    pub logging: LoggingConfig,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: String,
    /// File path, or `:memory:` for a throwaway store.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            path: "freelance-rates.db".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.path.clone(),
        }
    }
}

/// Values used when a `calculate` or `compare` flag is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub currency: Currency,
    pub location: Option<Location>,
    pub tax_rate_percent: Decimal,
    pub non_billable_hours_per_week: Decimal,
    pub annual_business_costs: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive; `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub region: String,
    /// A captured response from the market trend service. Without one the
    /// fallback rates are shown.
    pub response_file: Option<PathBuf>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            region: "Global".to_string(),
            response_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(
        content: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Loads `explicit` if given. Otherwise loads [`DEFAULT_CONFIG_FILE`]
    /// when it exists, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
