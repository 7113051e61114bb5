//! CSV directory data source
//!
//! Reads `<dir>/<symbol>.csv` files with at least `Date` and `Close` columns,
//! the layout a provider's download endpoint produces.

use super::MarketDataSource;
use crate::error::{FxError, Result};
use crate::types::{parse_date, ClosePoint, Date, DateRange};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: Option<f64>,
}

/// Offline source backed by one CSV file per ticker
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol))
    }

    /// Read one ticker file; a missing file is an empty series
    pub fn read_symbol(&self, symbol: &str, range: DateRange) -> Result<Vec<ClosePoint>> {
        let path = self.path_for(symbol);
        if !path.exists() {
            log::debug!("No CSV file for {} at {}", symbol, path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        parse_rows(&mut reader, range)
    }
}

fn parse_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    range: DateRange,
) -> Result<Vec<ClosePoint>> {
    let mut points = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow =
            result.map_err(|e| FxError::ParseError(format!("CSV parse error: {}", e)))?;
        let Some(close) = row.close else { continue };
        let date = parse_date(&row.date)?;
        if range.contains(date) {
            points.push(ClosePoint::new(date, close));
        }
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

impl MarketDataSource for CsvDirectorySource {
    async fn fetch_closes(&self, symbol: &str, start: Date, end: Date) -> Result<Vec<ClosePoint>> {
        self.read_symbol(symbol, DateRange::new(start, end))
    }

    fn name(&self) -> &str {
        "csv"
    }
}
