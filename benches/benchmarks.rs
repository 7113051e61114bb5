use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emerging_fx::chart::{render_line_chart, ChartOptions};
use emerging_fx::data::resample::monthly_mean;
use emerging_fx::data::PriceTable;
use emerging_fx::performance::ytd_variation;
use emerging_fx::types::ClosePoint;

const SYMBOLS: [&str; 5] = ["USDBRL=X", "USDARS=X", "USDMXN=X", "USDCNY=X", "USDINR=X"];

/// Five years of synthetic daily closes per symbol
fn synthetic_series() -> Vec<(&'static str, Vec<ClosePoint>)> {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            let level = 5.0 * 10f64.powi(i as i32 % 3);
            let points = (0..1826)
                .filter(|day| day % 7 < 5)
                .map(|day| {
                    let close = level * (1.0 + 0.1 * ((day as f64) / 90.0).sin());
                    ClosePoint::new(start + Duration::days(day), close)
                })
                .collect();
            (*symbol, points)
        })
        .collect()
}

fn benchmark_from_series(c: &mut Criterion) {
    let series = synthetic_series();
    c.bench_function("align_5_series_5_years", |b| {
        b.iter(|| PriceTable::from_series(black_box(series.clone())))
    });
}

fn benchmark_monthly_mean(c: &mut Criterion) {
    let table = PriceTable::from_series(synthetic_series());
    c.bench_function("monthly_mean_5_years", |b| {
        b.iter(|| monthly_mean(black_box(&table)).unwrap())
    });
}

fn benchmark_ytd(c: &mut Criterion) {
    let table = PriceTable::from_series(synthetic_series());
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    c.bench_function("ytd_variation", |b| {
        b.iter(|| ytd_variation(black_box(&table), start))
    });
}

fn benchmark_line_chart(c: &mut Criterion) {
    let table = PriceTable::from_series(synthetic_series());
    let monthly = monthly_mean(&table).unwrap();
    let options = ChartOptions::default();
    c.bench_function("render_line_chart", |b| {
        b.iter(|| render_line_chart(black_box(&monthly), monthly.last_date(), &options))
    });
}

criterion_group!(
    benches,
    benchmark_from_series,
    benchmark_monthly_mean,
    benchmark_ytd,
    benchmark_line_chart
);
criterion_main!(benches);
