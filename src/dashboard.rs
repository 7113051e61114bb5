//! Dashboard pipeline
//!
//! One request in, one view out: resolve the period, fetch the selected
//! tickers, aggregate monthly, compute YTD variation and render both charts.
//! Nothing is kept between requests.

use crate::chart::{render_bar_chart, render_line_chart, ChartOptions, RenderedChart};
use crate::config::ChartConfig;
use crate::currency::{self, Ticker};
use crate::data::fetcher::download_closes;
use crate::data::resample::monthly_mean;
use crate::data::sources::MarketDataSource;
use crate::data::PriceTable;
use crate::error::{FxError, Result};
use crate::performance::{ytd_variation, YtdVariation};
use crate::period::Period;
use crate::types::{Date, DateRange};
use chrono::Local;
use serde::Serialize;

/// User selection for one dashboard render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardRequest {
    /// Period label; unknown labels fall back to "since 2019"
    pub period: String,
    /// Selected display labels; `None` selects every currency
    pub currencies: Option<Vec<String>>,
}

impl DashboardRequest {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            currencies: None,
        }
    }

    pub fn with_currencies<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.currencies = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Build a request from decoded query pairs.
    ///
    /// `period` picks the horizon (default "1 year"); every `currency` pair
    /// adds a label. The page form also sends `submitted`, so a submitted form
    /// with no boxes ticked is an explicit empty selection.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let period = pairs
            .iter()
            .rev()
            .find(|(k, _)| k == "period")
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| Period::default().label().to_string());

        let labels: Vec<String> = pairs
            .iter()
            .filter(|(k, _)| k == "currency")
            .map(|(_, v)| v.clone())
            .collect();
        let submitted = pairs.iter().any(|(k, _)| k == "submitted");

        Self {
            period,
            currencies: (submitted || !labels.is_empty()).then_some(labels),
        }
    }

    /// Resolved period
    pub fn period(&self) -> Period {
        Period::from_label(&self.period)
    }

    /// Registry entries for the selection, in registry order
    pub fn tickers(&self) -> Vec<Ticker> {
        match &self.currencies {
            Some(labels) => currency::select_by_labels(labels),
            None => currency::TICKERS.to_vec(),
        }
    }

    /// Whether a display label is part of the selection
    pub fn is_selected(&self, label: &str) -> bool {
        self.currencies
            .as_ref()
            .map_or(true, |labels| labels.iter().any(|l| l == label))
    }
}

/// Everything needed to show one dashboard render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub period: Period,
    pub range: DateRange,
    pub currencies: Vec<String>,
    /// Most recent date in the raw daily table
    pub last_updated: Option<Date>,
    pub daily: PriceTable,
    pub monthly: PriceTable,
    pub ytd: YtdVariation,
    pub line_chart: RenderedChart,
    pub bar_chart: RenderedChart,
}

/// Stateless dashboard pipeline over a market-data source
#[derive(Debug)]
pub struct Dashboard<S> {
    source: S,
    chart: ChartConfig,
}

impl<S: MarketDataSource> Dashboard<S> {
    pub fn new(source: S, chart: ChartConfig) -> Self {
        Self { source, chart }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the pipeline for `request` with `today` as the end date
    pub async fn run(&self, request: &DashboardRequest, today: Date) -> Result<DashboardView> {
        let period = request.period();
        let range = period.range_until(today);
        let tickers = request.tickers();
        if tickers.is_empty() {
            return Err(FxError::EmptySelection);
        }

        log::info!(
            "Dashboard request: period={} currencies={} range={}..{}",
            period,
            tickers.len(),
            range.start,
            range.end
        );

        let symbols: Vec<&str> = tickers.iter().map(|t| t.symbol).collect();
        let raw = download_closes(&self.source, &symbols, range).await?;
        let daily = raw.rename_columns(|symbol| {
            currency::label_for(symbol)
                .map(str::to_string)
                .unwrap_or_else(|| symbol.to_string())
        });

        let monthly = monthly_mean(&daily)?;
        let ytd = ytd_variation(&daily, self.chart.ytd_start);
        let last_updated = daily.last_date();

        let options = ChartOptions::from(&self.chart);
        let line_chart = render_line_chart(&monthly, last_updated, &options);
        let bar_chart = render_bar_chart(&ytd, last_updated, &options);

        Ok(DashboardView {
            period,
            range,
            currencies: daily.column_names().into_iter().map(str::to_string).collect(),
            last_updated,
            daily,
            monthly,
            ytd,
            line_chart,
            bar_chart,
        })
    }

    /// Run the pipeline ending on the local current date
    pub async fn run_today(&self, request: &DashboardRequest) -> Result<DashboardView> {
        self.run(request, Local::now().date_naive()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_request_defaults() {
        let request = DashboardRequest::from_query_pairs(&[]);
        assert_eq!(request.period, "1 year");
        assert_eq!(request.currencies, None);
        assert_eq!(request.tickers().len(), 5);
        assert!(request.is_selected("Real (BRL)"));
    }

    #[test]
    fn test_request_with_currencies() {
        let request = DashboardRequest::from_query_pairs(&pairs(&[
            ("period", "3 years"),
            ("currency", "Indian Rupee (INR)"),
            ("currency", "Real (BRL)"),
        ]));
        assert_eq!(request.period(), Period::ThreeYears);
        let symbols: Vec<_> = request.tickers().iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["USDBRL=X", "USDINR=X"]);
        assert!(!request.is_selected("Mexican Peso (MXN)"));
    }

    #[test]
    fn test_submitted_form_without_currencies_is_empty_selection() {
        let request = DashboardRequest::from_query_pairs(&pairs(&[
            ("period", "5 years"),
            ("submitted", "1"),
        ]));
        assert_eq!(request.currencies, Some(vec![]));
        assert!(request.tickers().is_empty());
    }
}
