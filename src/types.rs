//! Core types and constants

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date used for every table index
pub type Date = NaiveDate;

/// Ticker symbol as understood by the market-data provider
pub type Symbol = String;

/// Exchange rate (units of local currency per USD)
pub type Price = f64;

/// Percentage change (100.0 == doubled)
pub type Percent = f64;

/// Date format used in captions, query strings and CSV files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One daily closing observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: Date,
    pub close: Price,
}

impl ClosePoint {
    /// Create a new close observation
    pub fn new(date: Date, close: Price) -> Self {
        Self { date, close }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls inside the range
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> crate::error::Result<Date> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| crate::error::FxError::ParseError(format!("Date parse error for '{}': {}", s, e)))
}
