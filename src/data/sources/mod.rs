//! Market data source integrations
//!
//! This module provides the collaborators that supply daily close series:
//! - Yahoo Finance: chart API over HTTP (default)
//! - CSV directory: one `<symbol>.csv` file per ticker, for offline rendering
//! - In-memory: fixed series, for tests and benchmarks

pub mod csv_dir;
pub mod in_memory;
pub mod yahoo;

pub use csv_dir::CsvDirectorySource;
pub use in_memory::InMemorySource;
pub use yahoo::YahooFinanceSource;

use crate::config::SourceConfig;
use crate::error::Result;
use crate::types::{ClosePoint, Date};
use std::future::Future;

/// Trait for market data sources
pub trait MarketDataSource: Send + Sync {
    /// Fetch the daily close series for one symbol over `[start, end]`.
    ///
    /// An unknown symbol or a range without trading days yields an empty
    /// series rather than an error.
    fn fetch_closes(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<Vec<ClosePoint>>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Source selected at startup from configuration or CLI flags
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Yahoo(YahooFinanceSource),
    Csv(CsvDirectorySource),
}

impl ConfiguredSource {
    /// Build the source described by the `[source]` config section
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        match &config.csv_dir {
            Some(dir) => Ok(ConfiguredSource::Csv(CsvDirectorySource::new(dir))),
            None => Ok(ConfiguredSource::Yahoo(YahooFinanceSource::from_config(
                config,
            )?)),
        }
    }
}

impl MarketDataSource for ConfiguredSource {
    async fn fetch_closes(&self, symbol: &str, start: Date, end: Date) -> Result<Vec<ClosePoint>> {
        match self {
            ConfiguredSource::Yahoo(source) => source.fetch_closes(symbol, start, end).await,
            ConfiguredSource::Csv(source) => source.fetch_closes(symbol, start, end).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            ConfiguredSource::Yahoo(source) => source.name(),
            ConfiguredSource::Csv(source) => source.name(),
        }
    }
}
