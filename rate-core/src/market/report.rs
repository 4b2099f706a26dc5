//! Market rate data returned by the external trend source.
//!
//! The source answers a free-text prompt with a JSON object, possibly
//! wrapped in prose:
//!
//! ```json
//! {
//!   "rates": { "webDev": 85, "mobileDev": 90, "dataScience": 105, "uiDesign": 70, "devOps": 95 },
//!   "trends": ["..."],
//!   "insights": ["..."]
//! }
//! ```
//!
//! Rates are USD per hour. Values above the hourly ceiling are taken to be
//! annual salaries and converted before clamping.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MarketFetchError;

/// Lowest hourly rate accepted from the source.
pub const MIN_MARKET_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Highest hourly rate accepted from the source.
pub const MAX_MARKET_RATE: Decimal = Decimal::from_parts(250, 0, 0, false, 0);
/// Working hours in a year, for salary-to-hourly conversion.
pub const ANNUAL_HOURS: Decimal = Decimal::from_parts(2080, 0, 0, false, 0);

static JSON_OBJECT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}"));

/// Hourly USD rates per market category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRates {
    pub web_dev: Decimal,
    pub mobile_dev: Decimal,
    pub data_science: Decimal,
    pub ui_design: Decimal,
    pub dev_ops: Decimal,
}

impl MarketRates {
    /// Static rates used when the source is unavailable.
    pub fn fallback() -> Self {
        Self {
            web_dev: Decimal::from(85),
            mobile_dev: Decimal::from(90),
            data_science: Decimal::from(105),
            ui_design: Decimal::from(70),
            dev_ops: Decimal::from(95),
        }
    }

    /// Applies [`normalize_market_rate`] to every category.
    pub fn normalized(self) -> Self {
        Self {
            web_dev: normalize_market_rate(self.web_dev),
            mobile_dev: normalize_market_rate(self.mobile_dev),
            data_science: normalize_market_rate(self.data_science),
            ui_design: normalize_market_rate(self.ui_design),
            dev_ops: normalize_market_rate(self.dev_ops),
        }
    }

    /// `(label, rate)` pairs in display order.
    pub fn labelled(&self) -> [(&'static str, Decimal); 5] {
        [
            ("Web Development", self.web_dev),
            ("Mobile Development", self.mobile_dev),
            ("Data Science", self.data_science),
            ("UI Design", self.ui_design),
            ("DevOps", self.dev_ops),
        ]
    }
}

/// Where a [`MarketReport`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketReport {
    pub rates: MarketRates,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(skip, default = "live")]
    pub source: ReportSource,
}

fn live() -> ReportSource {
    ReportSource::Live
}

impl MarketReport {
    pub fn fallback() -> Self {
        Self {
            rates: MarketRates::fallback(),
            trends: vec![
                "Demand for AI and machine learning skills keeps rising".to_string(),
                "Remote contracts remain the norm for software work".to_string(),
                "Clients increasingly prefer specialists over generalists".to_string(),
            ],
            insights: vec![
                "Data science and DevOps command the highest hourly rates".to_string(),
                "Portfolio quality strongly influences achievable rates".to_string(),
            ],
            source: ReportSource::Fallback,
        }
    }
}

/// One month of the historical trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrendPoint {
    pub month: String,
    pub web_dev: Decimal,
    pub mobile_dev: Decimal,
    pub data_science: Decimal,
}

/// Average hourly rates over the past six months.
pub fn default_trend_series() -> Vec<MarketTrendPoint> {
    [
        ("Jan", 75, 80, 90),
        ("Feb", 78, 82, 92),
        ("Mar", 80, 85, 95),
        ("Apr", 82, 88, 98),
        ("May", 85, 90, 100),
        ("Jun", 88, 92, 105),
    ]
    .into_iter()
    .map(|(month, web, mobile, data)| MarketTrendPoint {
        month: month.to_string(),
        web_dev: Decimal::from(web),
        mobile_dev: Decimal::from(mobile),
        data_science: Decimal::from(data),
    })
    .collect()
}

/// Converts a reported rate into a plausible hourly rate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rate_core::market::normalize_market_rate;
///
/// assert_eq!(normalize_market_rate(dec!(95)), dec!(95));
/// assert_eq!(normalize_market_rate(dec!(5)), dec!(20));
/// // An annual salary of 208,000 is 100 per hour
/// assert_eq!(normalize_market_rate(dec!(208000)), dec!(100));
/// ```
pub fn normalize_market_rate(value: Decimal) -> Decimal {
    let hourly = if value > MAX_MARKET_RATE {
        value / ANNUAL_HOURS
    } else {
        value
    };
    hourly.clamp(MIN_MARKET_RATE, MAX_MARKET_RATE)
}

/// The prompt sent to the trend source for `region`.
pub fn market_prompt(region: &str) -> String {
    format!(
        "Provide current average freelance hourly rates in USD for {region}. \
         Respond with JSON only, shaped as \
         {{\"rates\": {{\"webDev\": number, \"mobileDev\": number, \"dataScience\": number, \
         \"uiDesign\": number, \"devOps\": number}}, \
         \"trends\": [string], \"insights\": [string]}}."
    )
}

/// Extracts and normalizes the report from a raw source response.
///
/// # Errors
///
/// Returns [`MarketFetchError::Unparseable`] if no JSON object is present or
/// it does not have the expected shape.
pub fn parse_market_response(body: &str) -> Result<MarketReport, MarketFetchError> {
    let pattern = JSON_OBJECT
        .as_ref()
        .map_err(|e| MarketFetchError::Unparseable(e.to_string()))?;
    let json = pattern
        .find(body)
        .ok_or_else(|| MarketFetchError::Unparseable("no JSON object in response".to_string()))?;

    let mut report: MarketReport = serde_json::from_str(json.as_str())
        .map_err(|e| MarketFetchError::Unparseable(e.to_string()))?;
    report.rates = report.rates.normalized();
    report.source = ReportSource::Live;
    Ok(report)
}
