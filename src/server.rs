//! HTTP front end
//!
//! Every route re-runs the pipeline for the query it receives; the server
//! keeps no per-user state.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::dashboard::Dashboard;
use crate::data::sources::MarketDataSource;
use crate::error::Result;

pub use error::AppError;

/// Build the application router around a dashboard
pub fn router<S: MarketDataSource + 'static>(dashboard: Dashboard<S>) -> Router {
    let state = Arc::new(dashboard);

    Router::new()
        .route("/", get(routes::index::<S>))
        .route("/api/dashboard", get(routes::dashboard_json::<S>))
        .route("/api/tickers", get(routes::tickers))
        .route("/api/periods", get(routes::periods))
        .route("/charts/line.svg", get(routes::line_svg::<S>))
        .route("/charts/bar.svg", get(routes::bar_svg::<S>))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve<S: MarketDataSource + 'static>(addr: &str, dashboard: Dashboard<S>) -> Result<()> {
    let app = router(dashboard);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
