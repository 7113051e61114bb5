//! Analysis period selection

use crate::types::{Date, DateRange};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Period horizons offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "3 years")]
    ThreeYears,
    #[serde(rename = "5 years")]
    FiveYears,
    #[serde(rename = "since 2019")]
    Since2019,
}

impl Period {
    /// All periods in the order they are offered
    pub const ALL: [Period; 4] = [
        Period::OneYear,
        Period::ThreeYears,
        Period::FiveYears,
        Period::Since2019,
    ];

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneYear => "1 year",
            Period::ThreeYears => "3 years",
            Period::FiveYears => "5 years",
            Period::Since2019 => "since 2019",
        }
    }

    /// Parse a label. Anything unrecognised falls back to `Since2019`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "1 year" => Period::OneYear,
            "3 years" => Period::ThreeYears,
            "5 years" => Period::FiveYears,
            _ => Period::Since2019,
        }
    }

    /// Fixed start date for the period
    pub fn start_date(&self) -> Date {
        let (y, m, d) = match self {
            Period::OneYear => (2023, 1, 1),
            Period::ThreeYears => (2021, 1, 1),
            Period::FiveYears | Period::Since2019 => (2019, 1, 1),
        };
        // Literal dates above are always valid
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    /// Date range from the period start through `today`
    pub fn range_until(&self, today: Date) -> DateRange {
        DateRange::new(self.start_date(), today)
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::OneYear
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resolve a period label to a concrete date range ending `today`
pub fn resolve(label: &str, today: Date) -> DateRange {
    Period::from_label(label).range_until(today)
}

/// Resolve a period label against the local clock
pub fn resolve_today(label: &str) -> DateRange {
    resolve(label, Local::now().date_naive())
}
