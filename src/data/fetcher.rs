//! Multi-ticker close download
//!
//! Requests each ticker in turn and aligns the non-empty series into a single
//! [`PriceTable`]. Tickers that come back empty are skipped; a table is only
//! produced if at least one ticker returned data.

use super::sources::MarketDataSource;
use super::PriceTable;
use crate::error::{FxError, Result};
use crate::types::{ClosePoint, DateRange};

/// Download close series for `symbols` over `range` and align them.
///
/// Columns are named by symbol and appear in request order. Requests are
/// issued one after another; a provider error aborts the download.
pub async fn download_closes<S, T>(source: &S, symbols: &[T], range: DateRange) -> Result<PriceTable>
where
    S: MarketDataSource,
    T: AsRef<str>,
{
    if symbols.is_empty() {
        return Err(FxError::EmptySelection);
    }

    let mut fetched: Vec<(String, Vec<ClosePoint>)> = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let symbol = symbol.as_ref();
        let points = source.fetch_closes(symbol, range.start, range.end).await?;

        if points.is_empty() {
            log::warn!(
                "No data for {} between {} and {}, skipping",
                symbol,
                range.start,
                range.end
            );
            continue;
        }

        log::info!("Fetched {} closes for {} from {}", points.len(), symbol, source.name());
        fetched.push((symbol.to_string(), points));
    }

    if fetched.is_empty() {
        return Err(FxError::NoData);
    }

    let table = PriceTable::from_series(fetched);
    log::debug!(
        "Aligned {} columns over {} dates",
        table.width(),
        table.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sources::InMemorySource;
    use chrono::{Duration, NaiveDate};

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    fn daily(n: i64, value: f64) -> Vec<ClosePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        (0..n)
            .map(|i| ClosePoint::new(start + Duration::days(i), value + i as f64))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_ticker_is_skipped() {
        let source = InMemorySource::new().with_series("A", daily(10, 1.0));
        let table = download_closes(&source, &["A", "B"], range()).await.unwrap();

        assert_eq!(table.width(), 1);
        assert_eq!(table.len(), 10);
        assert_eq!(table.column_names(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_all_empty_is_no_data() {
        let source = InMemorySource::new();
        let err = download_closes(&source, &["A", "B"], range()).await.unwrap_err();
        assert!(matches!(err, FxError::NoData));
    }

    #[tokio::test]
    async fn test_empty_selection_does_no_io() {
        let source = InMemorySource::new();
        let none: [&str; 0] = [];
        let err = download_closes(&source, &none, range()).await.unwrap_err();
        assert!(matches!(err, FxError::EmptySelection));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_columns_follow_request_order() {
        let source = InMemorySource::new()
            .with_series("A", daily(3, 1.0))
            .with_series("B", daily(5, 10.0));
        let table = download_closes(&source, &["B", "A"], range()).await.unwrap();

        assert_eq!(table.column_names(), vec!["B", "A"]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.column("A").unwrap().values()[4], None);
        assert_eq!(source.requests(), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let source = InMemorySource::new()
            .with_series("A", daily(3, 1.0))
            .with_failure("B");
        let err = download_closes(&source, &["A", "B"], range()).await.unwrap_err();
        assert!(err.is_upstream());
    }
}
