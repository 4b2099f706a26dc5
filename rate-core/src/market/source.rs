use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::report::{MarketReport, market_prompt, parse_market_response};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketFetchError {
    #[error("market rate source unavailable: {0}")]
    Unavailable(String),

    #[error("market rate response could not be parsed: {0}")]
    Unparseable(String),
}

/// An external service that answers market-rate prompts with free text.
#[async_trait]
pub trait MarketRateSource: Send + Sync {
    async fn fetch(
        &self,
        prompt: &str,
    ) -> Result<String, MarketFetchError>;
}

/// A source that always answers with the same body, or always fails when
/// built with [`StaticMarketRateSource::unavailable`].
#[derive(Debug, Clone)]
pub struct StaticMarketRateSource {
    response: Result<String, MarketFetchError>,
}

impl StaticMarketRateSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            response: Err(MarketFetchError::Unavailable(reason.into())),
        }
    }
}

#[async_trait]
impl MarketRateSource for StaticMarketRateSource {
    async fn fetch(
        &self,
        _prompt: &str,
    ) -> Result<String, MarketFetchError> {
        self.response.clone()
    }
}

/// Fetches and parses a market report for `region`.
///
/// The source is asked once. Any failure is logged and replaced by
/// [`MarketReport::fallback`].
pub async fn load_market_report(
    source: &dyn MarketRateSource,
    region: &str,
) -> MarketReport {
    let prompt = market_prompt(region);
    let result = match source.fetch(&prompt).await {
        Ok(body) => parse_market_response(&body),
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            info!(region, "Loaded live market rates");
            report
        }
        Err(e) => {
            warn!(region, error = %e, "Market rates unavailable, using fallback data");
            MarketReport::fallback()
        }
    }
}
