//! Integration tests for market data sources
//!
//! The CSV directory source is exercised end to end through the fetcher and
//! the dashboard; the Yahoo source is tested against recorded chart bodies.

use chrono::NaiveDate;
use emerging_fx::config::{ChartConfig, SourceConfig};
use emerging_fx::dashboard::{Dashboard, DashboardRequest};
use emerging_fx::data::fetcher::download_closes;
use emerging_fx::data::sources::yahoo::parse_chart;
use emerging_fx::data::sources::{ConfiguredSource, CsvDirectorySource, MarketDataSource};
use emerging_fx::error::FxError;
use emerging_fx::types::DateRange;
use std::fs;
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn quotes_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("USDBRL=X.csv"),
        "Date,Open,High,Low,Close\n\
         2024-02-01,4.95,4.97,4.93,4.96\n\
         2024-01-02,4.85,4.91,4.84,4.90\n\
         2024-01-03,4.90,4.93,4.89,\n\
         2024-02-29,4.97,5.00,4.96,4.98\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("USDCNY=X.csv"),
        "Date,Close\n2024-01-02,7.10\n2024-02-29,7.19\n",
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn test_csv_directory_through_fetcher() {
    let dir = quotes_dir();
    let source = CsvDirectorySource::new(dir.path());
    let range = DateRange::new(d(2024, 1, 1), d(2024, 12, 31));

    let table = download_closes(&source, &["USDBRL=X", "USDARS=X", "USDCNY=X"], range)
        .await
        .unwrap();

    // ARS has no file and is skipped
    assert_eq!(table.column_names(), vec!["USDBRL=X", "USDCNY=X"]);
    assert_eq!(
        table.dates(),
        &[d(2024, 1, 2), d(2024, 2, 1), d(2024, 2, 29)]
    );
    // CNY has no quote on 2024-02-01
    assert_eq!(table.column("USDCNY=X").unwrap().values()[1], None);
}

#[tokio::test]
async fn test_csv_directory_without_matching_files_is_no_data() {
    let dir = TempDir::new().unwrap();
    let source = CsvDirectorySource::new(dir.path());
    let range = DateRange::new(d(2024, 1, 1), d(2024, 12, 31));

    let result = download_closes(&source, &["USDMXN=X"], range).await;
    assert!(matches!(result, Err(FxError::NoData)));
}

#[tokio::test]
async fn test_configured_csv_source_drives_dashboard() {
    let dir = quotes_dir();
    let config = SourceConfig {
        csv_dir: Some(dir.path().to_path_buf()),
        ..SourceConfig::default()
    };
    let source = ConfiguredSource::from_config(&config).unwrap();
    assert_eq!(source.name(), "csv");

    let dashboard = Dashboard::new(source, ChartConfig::default());
    let view = dashboard
        .run(&DashboardRequest::new("1 year"), d(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(view.currencies, vec!["Real (BRL)", "Chinese Yuan (CNY)"]);
    assert_eq!(view.monthly.dates(), &[d(2024, 1, 31), d(2024, 2, 29)]);

    let mut csv = Vec::new();
    view.monthly.write_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("date,Real (BRL),Chinese Yuan (CNY)\n"));
    assert!(csv.contains("2024-01-31,4.9,7.1\n"));
}

#[test]
fn test_yahoo_chart_body_with_missing_closes() {
    let body = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "USDMXN=X", "gmtoffset": 0},
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {"quote": [{"close": [17.01, null, 17.12]}]}
            }],
            "error": null
        }
    }"#;
    let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));

    let points = parse_chart("USDMXN=X", body, range).unwrap();

    let dates: Vec<_> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2024, 1, 2), d(2024, 1, 4)]);
}
