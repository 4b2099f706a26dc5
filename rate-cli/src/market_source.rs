//! Market rate sources available to the command line.

use std::path::PathBuf;

use async_trait::async_trait;
use rate_core::market::{MarketFetchError, MarketRateSource, StaticMarketRateSource};
use tracing::debug;

use crate::config::MarketConfig;

/// Reads a previously captured service response from disk.
#[derive(Debug, Clone)]
pub struct FileMarketRateSource {
    path: PathBuf,
}

impl FileMarketRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketRateSource for FileMarketRateSource {
    async fn fetch(
        &self,
        prompt: &str,
    ) -> Result<String, MarketFetchError> {
        debug!(path = %self.path.display(), prompt, "Reading market response");
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MarketFetchError::Unavailable(format!("{}: {e}", self.path.display()))
        })
    }
}

/// The configured source. With no response file every fetch fails, so the
/// fallback report is shown.
pub fn market_source(config: &MarketConfig) -> Box<dyn MarketRateSource> {
    match &config.response_file {
        Some(path) => Box::new(FileMarketRateSource::new(path.clone())),
        None => Box::new(StaticMarketRateSource::unavailable(
            "no market response file configured",
        )),
    }
}
