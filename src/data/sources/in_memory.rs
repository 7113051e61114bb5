//! In-memory data source
//!
//! Serves pre-loaded close series. Useful for tests, benchmarks and demos
//! where no network access is wanted.

use super::MarketDataSource;
use crate::error::{FxError, Result};
use crate::types::{ClosePoint, Date, DateRange};
use hashbrown::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory close series keyed by symbol
#[derive(Debug, Default)]
pub struct InMemorySource {
    series: HashMap<String, Vec<ClosePoint>>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl InMemorySource {
    /// Create an empty source (every symbol returns no data)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series for a symbol, replacing any previous one
    pub fn with_series(mut self, symbol: &str, points: Vec<ClosePoint>) -> Self {
        self.series.insert(symbol.to_string(), points);
        self
    }

    /// Make every request for `symbol` fail with a provider error
    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    /// Symbols requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl MarketDataSource for InMemorySource {
    async fn fetch_closes(&self, symbol: &str, start: Date, end: Date) -> Result<Vec<ClosePoint>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(symbol.to_string());

        if self.failing.contains(symbol) {
            return Err(FxError::provider(symbol, "simulated provider failure"));
        }

        let range = DateRange::new(start, end);
        Ok(self
            .series
            .get(symbol)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| range.contains(p.date))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
