//! # Emerging FX
//!
//! Dashboard for emerging-market currencies quoted against the US dollar.
//!
//! Daily closes are fetched for a selection of tickers, averaged per month
//! and compared against the start of the year. The results are rendered as a
//! dual-axis line chart and a YTD bar chart, served as an HTML page.
//!
//! ## Example
//!
//! ```rust,no_run
//! use emerging_fx::prelude::*;
//!
//! # async fn demo() -> Result<()> {
//! let config = Config::load(None)?;
//! let source = YahooFinanceSource::from_config(&config.source)?;
//! let dashboard = Dashboard::new(source, config.chart);
//!
//! let request = DashboardRequest::new("3 years");
//! let view = dashboard.run_today(&request).await?;
//! println!("{}", view.line_chart.svg);
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod page;
pub mod performance;
pub mod period;
pub mod server;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::chart::{RenderedChart, ChartOptions};
    pub use crate::config::Config;
    pub use crate::currency::{Currency, Ticker, TICKERS};
    pub use crate::dashboard::{Dashboard, DashboardRequest, DashboardView};
    pub use crate::data::sources::{
        ConfiguredSource, CsvDirectorySource, InMemorySource, MarketDataSource, YahooFinanceSource,
    };
    pub use crate::data::PriceTable;
    pub use crate::error::{FxError, Result};
    pub use crate::performance::YtdVariation;
    pub use crate::period::Period;
    pub use crate::types::*;
}
