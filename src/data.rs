//! Market data handling
//!
//! [`PriceTable`] is the date-indexed, column-per-currency table every stage of
//! the dashboard passes around. Tables are immutable: each transformation
//! returns a fresh table.

pub mod fetcher;
pub mod resample;
pub mod sources;

use crate::error::{FxError, Result};
use crate::types::{ClosePoint, Date, Price, DATE_FORMAT};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// A named column of optional values aligned with the table index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Option<Price>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<Price>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<Price>] {
        &self.values
    }

    /// Non-missing values in index order
    pub fn observed(&self) -> impl Iterator<Item = Price> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    /// First non-missing value
    pub fn first_value(&self) -> Option<Price> {
        self.observed().next()
    }

    /// Last non-missing value
    pub fn last_value(&self) -> Option<Price> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

/// Date-indexed table with one column per currency
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceTable {
    dates: Vec<Date>,
    columns: Vec<Column>,
}

impl PriceTable {
    /// Build a table, checking the index is strictly increasing and every
    /// column matches its length.
    pub fn new(dates: Vec<Date>, columns: Vec<Column>) -> Result<Self> {
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FxError::ParseError(
                "Table dates must be strictly increasing".to_string(),
            ));
        }
        if let Some(bad) = columns.iter().find(|c| c.values.len() != dates.len()) {
            return Err(FxError::ParseError(format!(
                "Column '{}' has {} values for {} dates",
                bad.name,
                bad.values.len(),
                dates.len()
            )));
        }
        Ok(Self { dates, columns })
    }

    /// Align several close series on the union of their dates.
    ///
    /// Column order follows the input order. A series reporting the same date
    /// twice keeps the later value.
    pub fn from_series<S: Into<String>>(series: Vec<(S, Vec<ClosePoint>)>) -> Self {
        let mut index: BTreeMap<Date, Vec<Option<Price>>> = BTreeMap::new();
        let width = series.len();
        let mut names = Vec::with_capacity(width);

        for (col, (name, points)) in series.into_iter().enumerate() {
            names.push(name.into());
            for point in points {
                index.entry(point.date).or_insert_with(|| vec![None; width])[col] =
                    Some(point.close);
            }
        }

        let dates: Vec<Date> = index.keys().copied().collect();
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(col, name)| Column {
                name,
                values: index.values().map(|row| row[col]).collect(),
            })
            .collect();

        Self { dates, columns }
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Most recent date in the index
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Copy of the table with every column renamed through `rename`
    pub fn rename_columns<F>(&self, rename: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self {
            dates: self.dates.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(rename(&c.name), c.values.clone()))
                .collect(),
        }
    }

    /// Rows with `start <= date <= end`
    pub fn slice(&self, start: Date, end: Date) -> Self {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end).max(lo);

        Self {
            dates: self.dates[lo..hi].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.values[lo..hi].to_vec()))
                .collect(),
        }
    }

    /// Iterate rows as (date, values in column order)
    pub fn rows(&self) -> impl Iterator<Item = (Date, Vec<Option<Price>>)> + '_ {
        self.dates
            .iter()
            .enumerate()
            .map(move |(i, date)| (*date, self.columns.iter().map(|c| c.values[i]).collect()))
    }

    /// Write the table as CSV: `date,<column>...`, missing values left empty
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["date".to_string()];
        header.extend(self.columns.iter().map(|c| c.name.clone()));
        wtr.write_record(&header)?;

        for (date, values) in self.rows() {
            let mut record = vec![date.format(DATE_FORMAT).to_string()];
            record.extend(
                values
                    .into_iter()
                    .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> Date {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample() -> PriceTable {
        PriceTable::from_series(vec![
            ("A", vec![ClosePoint::new(d(2), 1.0), ClosePoint::new(d(4), 2.0)]),
            ("B", vec![ClosePoint::new(d(3), 10.0), ClosePoint::new(d(4), 20.0)]),
        ])
    }

    #[test]
    fn test_union_alignment() {
        let table = sample();
        assert_eq!(table.dates(), &[d(2), d(3), d(4)]);
        assert_eq!(table.column("A").unwrap().values(), &[Some(1.0), None, Some(2.0)]);
        assert_eq!(table.column("B").unwrap().values(), &[None, Some(10.0), Some(20.0)]);
        assert_eq!(table.column_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_duplicate_dates_keep_last() {
        let table = PriceTable::from_series(vec![(
            "A",
            vec![ClosePoint::new(d(2), 1.0), ClosePoint::new(d(2), 3.0)],
        )]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.column("A").unwrap().first_value(), Some(3.0));
    }

    #[test]
    fn test_slice_inclusive() {
        let table = sample();
        let sliced = table.slice(d(3), d(4));
        assert_eq!(sliced.dates(), &[d(3), d(4)]);
        assert_eq!(sliced.column("A").unwrap().values(), &[None, Some(2.0)]);

        let empty = table.slice(d(10), d(20));
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 2);
    }

    #[test]
    fn test_first_last_skip_gaps() {
        let table = sample();
        let b = table.column("B").unwrap();
        assert_eq!(b.first_value(), Some(10.0));
        assert_eq!(b.last_value(), Some(20.0));
    }

    #[test]
    fn test_rename_returns_fresh_table() {
        let table = sample();
        let renamed = table.rename_columns(|name| format!("{} (X)", name));
        assert_eq!(renamed.column_names(), vec!["A (X)", "B (X)"]);
        assert_eq!(table.column_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_new_rejects_unsorted_index() {
        let result = PriceTable::new(vec![d(3), d(2)], vec![]);
        assert!(result.is_err());

        let result = PriceTable::new(vec![d(2)], vec![Column::new("A", vec![])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        sample().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,A,B");
        assert_eq!(lines[1], "2024-01-02,1,");
        assert_eq!(lines[3], "2024-01-04,2,20");
    }
}
