//! Year-to-date variation

use crate::data::PriceTable;
use crate::error::Result;
use crate::types::{Date, Percent, Price};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::io::Write;

/// Default start of the YTD window
pub fn default_ytd_start() -> Date {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Percent change from `first` to `last`; `None` when `first` is zero
pub fn percent_change(first: Price, last: Price) -> Option<Percent> {
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// One currency's YTD variation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YtdRow {
    pub currency: String,
    pub variation_pct: Percent,
}

/// YTD variation per currency, in table column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YtdVariation {
    pub start: Date,
    pub rows: Vec<YtdRow>,
}

impl YtdVariation {
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn get(&self, currency: &str) -> Option<Percent> {
        self.rows
            .iter()
            .find(|r| r.currency == currency)
            .map(|r| r.variation_pct)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write as CSV: `currency,ytd_variation_pct`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["currency", "ytd_variation_pct"])?;
        for row in &self.rows {
            wtr.write_record([row.currency.clone(), row.variation_pct.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Compute YTD variation from `start` through the table's last date.
///
/// Uses each column's first and last observation inside the window. Columns
/// with no observation in the window, or whose first observation is zero, are
/// left out of the result.
pub fn ytd_variation(table: &PriceTable, start: Date) -> YtdVariation {
    let mut rows = Vec::with_capacity(table.width());

    let Some(end) = table.last_date() else {
        return YtdVariation { start, rows };
    };
    let window = table.slice(start, end);

    for column in window.columns() {
        let (Some(first), Some(last)) = (column.first_value(), column.last_value()) else {
            log::warn!("No observations for {} since {}, skipping YTD", column.name(), start);
            continue;
        };

        match percent_change(first, last) {
            Some(pct) => rows.push(YtdRow {
                currency: column.name().to_string(),
                variation_pct: pct,
            }),
            None => log::warn!("{} starts at zero on {}, skipping YTD", column.name(), start),
        }
    }

    YtdVariation { start, rows }
}
