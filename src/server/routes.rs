use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::{json, Value};

use super::error::AppError;
use crate::currency::TICKERS;
use crate::dashboard::{Dashboard, DashboardRequest, DashboardView};
use crate::data::sources::MarketDataSource;
use crate::page::{render_error_page, render_page};
use crate::period::Period;

pub type SharedDashboard<S> = Arc<Dashboard<S>>;

async fn build_view<S: MarketDataSource>(
    dashboard: &Dashboard<S>,
    request: &DashboardRequest,
) -> Result<DashboardView, AppError> {
    dashboard.run_today(request).await.map_err(|e| {
        log::warn!("Dashboard request failed: {}", e);
        AppError::from(e)
    })
}

/// GET /?period=1+year&currency=Real+(BRL)&currency=...
///
/// The dashboard page. Failures render the form with an error message.
pub async fn index<S: MarketDataSource + 'static>(
    State(dashboard): State<SharedDashboard<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request = DashboardRequest::from_query_pairs(&pairs);
    match build_view(&dashboard, &request).await {
        Ok(view) => Html(render_page(&view, &request)).into_response(),
        Err(err) => (err.status, Html(render_error_page(&err.message, &request))).into_response(),
    }
}

/// GET /api/dashboard?period=3+years
///
/// The full view as JSON: tables, YTD rows and both SVG charts.
pub async fn dashboard_json<S: MarketDataSource + 'static>(
    State(dashboard): State<SharedDashboard<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<DashboardView>, AppError> {
    let request = DashboardRequest::from_query_pairs(&pairs);
    Ok(Json(build_view(&dashboard, &request).await?))
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

/// GET /charts/line.svg
pub async fn line_svg<S: MarketDataSource + 'static>(
    State(dashboard): State<SharedDashboard<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let request = DashboardRequest::from_query_pairs(&pairs);
    let view = build_view(&dashboard, &request).await?;
    Ok(svg_response(view.line_chart.svg))
}

/// GET /charts/bar.svg
pub async fn bar_svg<S: MarketDataSource + 'static>(
    State(dashboard): State<SharedDashboard<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let request = DashboardRequest::from_query_pairs(&pairs);
    let view = build_view(&dashboard, &request).await?;
    Ok(svg_response(view.bar_chart.svg))
}

/// GET /api/tickers
pub async fn tickers() -> Json<Value> {
    let data: Vec<Value> = TICKERS
        .iter()
        .map(|t| {
            json!({
                "symbol": t.symbol,
                "label": t.label,
                "pair": t.pair.to_string(),
            })
        })
        .collect();
    let count = data.len();
    Json(json!({ "data": data, "count": count }))
}

/// GET /api/periods
pub async fn periods() -> Json<Value> {
    let data: Vec<Value> = Period::ALL
        .iter()
        .map(|p| json!({ "label": p.label(), "start": p.start_date().to_string() }))
        .collect();
    Json(json!({ "data": data, "default": Period::default().label() }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
