//! Market rate trends from an external source, with static fallback data.

mod report;
mod source;

pub use report::{
    ANNUAL_HOURS, MAX_MARKET_RATE, MIN_MARKET_RATE, MarketRates, MarketReport, MarketTrendPoint,
    ReportSource, default_trend_series, market_prompt, normalize_market_rate,
    parse_market_response,
};
pub use source::{MarketFetchError, MarketRateSource, StaticMarketRateSource, load_market_report};
