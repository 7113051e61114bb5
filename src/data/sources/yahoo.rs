//! Yahoo Finance data source integration
//!
//! Fetches daily closes from the public chart API (no API key required).

use super::MarketDataSource;
use crate::config::SourceConfig;
use crate::error::{FxError, Result};
use crate::types::{ClosePoint, Date, DateRange};
use chrono::{DateTime, Duration};
use reqwest::Client;
use serde::Deserialize;

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance data source
#[derive(Debug, Clone)]
pub struct YahooFinanceSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooFinanceSource {
    /// Create a new Yahoo Finance data source with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&SourceConfig::default())
    }

    /// Create a source from the `[source]` config section
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            FxError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

impl MarketDataSource for YahooFinanceSource {
    async fn fetch_closes(&self, symbol: &str, start: Date, end: Date) -> Result<Vec<ClosePoint>> {
        let range = DateRange::new(start, end);
        // period2 is exclusive on the provider side
        let period1 = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let period2 = (end + Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = self.chart_url(symbol);
        log::debug!("GET {} period1={} period2={}", url, period1, period2);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Unknown symbols come back as 404 with a "Not Found" chart error
            if let Ok(envelope) = serde_json::from_str::<ChartEnvelope>(&text) {
                if let Some(err) = envelope.chart.error {
                    if err.code == "Not Found" {
                        log::debug!("{}: {}", symbol, err.description);
                        return Ok(Vec::new());
                    }
                    return Err(FxError::provider(
                        symbol,
                        format!("{} ({}): {}", status, err.code, err.description),
                    ));
                }
            }
            return Err(FxError::provider(
                symbol,
                format!("Yahoo Finance returned error: {}", status),
            ));
        }

        parse_chart(symbol, &text, range)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Parse a chart API response body into close points inside `range`.
///
/// Null closes are dropped; timestamps are shifted by the exchange GMT offset
/// before taking the calendar date.
pub fn parse_chart(symbol: &str, body: &str, range: DateRange) -> Result<Vec<ClosePoint>> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| FxError::ParseError(format!("Chart response for {}: {}", symbol, e)))?;

    if let Some(err) = envelope.chart.error {
        if err.code == "Not Found" {
            return Ok(Vec::new());
        }
        return Err(FxError::provider(
            symbol,
            format!("{}: {}", err.code, err.description),
        ));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close else { continue };
        let date = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| FxError::ParseError(format!("Invalid timestamp {} for {}", ts, symbol)))?
            .date_naive();
        if range.contains(date) {
            points.push(ClosePoint::new(date, close));
        }
    }

    Ok(points)
}
