//! Data frequency resampling
//!
//! Converts the daily [`PriceTable`] to a monthly one. Each month becomes a
//! single row stamped at the month's last calendar day, holding the mean of
//! the values observed in that month.

use super::{Column, PriceTable};
use crate::error::Result;
use crate::types::{Date, Price};
use chrono::{Datelike, NaiveDate};

/// Trait for resampling a price table to a lower frequency
pub trait Resampler: Send + Sync {
    fn resample(&self, table: &PriceTable) -> Result<PriceTable>;
}

/// Running mean for one column within one period
#[derive(Debug, Default, Clone, Copy)]
struct MeanAggregator {
    sum: f64,
    count: usize,
}

impl MeanAggregator {
    fn add(&mut self, value: Price) {
        self.sum += value;
        self.count += 1;
    }

    /// Mean of the added values, `None` when nothing was added
    fn build(&self) -> Option<Price> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Last calendar day of the month containing `date`
pub fn month_end(date: Date) -> Date {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Daily to month-end mean resampler
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthEndMean;

impl MonthEndMean {
    pub fn new() -> Self {
        Self
    }

    /// Group row indices by (year, month), in index order
    fn group_by_month(&self, dates: &[Date]) -> Vec<(Date, std::ops::Range<usize>)> {
        let mut groups = Vec::new();
        let mut start = 0;

        for i in 1..=dates.len() {
            let boundary = i == dates.len()
                || (dates[i].year(), dates[i].month()) != (dates[start].year(), dates[start].month());
            if boundary {
                groups.push((month_end(dates[start]), start..i));
                start = i;
            }
        }

        groups
    }
}

impl Resampler for MonthEndMean {
    fn resample(&self, table: &PriceTable) -> Result<PriceTable> {
        if table.is_empty() {
            return PriceTable::new(
                Vec::new(),
                table
                    .columns()
                    .iter()
                    .map(|c| Column::new(c.name(), Vec::new()))
                    .collect(),
            );
        }

        let groups = self.group_by_month(table.dates());
        let dates = groups.iter().map(|(dt, _)| *dt).collect();

        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let values = groups
                    .iter()
                    .map(|(_, rows)| {
                        let mut agg = MeanAggregator::default();
                        for value in column.values()[rows.clone()].iter().flatten() {
                            agg.add(*value);
                        }
                        agg.build()
                    })
                    .collect();
                Column::new(column.name(), values)
            })
            .collect();

        PriceTable::new(dates, columns)
    }
}

/// Monthly averages of a daily table
pub fn monthly_mean(table: &PriceTable) -> Result<PriceTable> {
    MonthEndMean::new().resample(table)
}
