//! HTTP routing tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use emerging_fx::config::ChartConfig;
use emerging_fx::dashboard::Dashboard;
use emerging_fx::data::sources::InMemorySource;
use emerging_fx::server::router;
use emerging_fx::types::ClosePoint;
use serde_json::Value;
use tower::ServiceExt;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn source() -> InMemorySource {
    InMemorySource::new()
        .with_series(
            "USDBRL=X",
            vec![
                ClosePoint::new(d(2024, 1, 2), 4.90),
                ClosePoint::new(d(2024, 3, 1), 4.97),
            ],
        )
        .with_series(
            "USDINR=X",
            vec![
                ClosePoint::new(d(2024, 1, 2), 83.2),
                ClosePoint::new(d(2024, 3, 1), 82.9),
            ],
        )
}

fn app(source: InMemorySource) -> Router {
    router(Dashboard::new(source, ChartConfig::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_renders_page() {
    let (status, content_type, body) = get(app(source()), "/?period=since+2019").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("Emerging Market Currencies Dashboard"));
    assert!(body.contains("Line Chart: Monthly Average Values"));
    assert!(body.contains("<svg"));
}

#[tokio::test]
async fn test_index_with_explicit_empty_selection() {
    let (status, _, body) = get(app(source()), "/?period=1+year&submitted=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("No currencies selected"));
    assert!(body.contains("<form"));
}

#[tokio::test]
async fn test_dashboard_json() {
    let (status, _, body) = get(
        app(source()),
        "/api/dashboard?period=since+2019&currency=Real+%28BRL%29",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["period"], "since 2019");
    assert_eq!(json["currencies"], serde_json::json!(["Real (BRL)"]));
    assert_eq!(json["last_updated"], "2024-03-01");
    assert_eq!(json["ytd"]["rows"][0]["currency"], "Real (BRL)");
}

#[tokio::test]
async fn test_no_data_is_not_found() {
    let (status, _, body) = get(app(InMemorySource::new()), "/api/dashboard").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("No data"));
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let (status, _, _) = get(
        app(source().with_failure("USDBRL=X")),
        "/api/dashboard?period=since+2019",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_chart_endpoints_serve_svg() {
    for uri in ["/charts/line.svg?period=since+2019", "/charts/bar.svg?period=since+2019"] {
        let (status, content_type, body) = get(app(source()), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
        assert!(body.starts_with("<svg"));
    }
}

#[tokio::test]
async fn test_tickers_and_periods() {
    let (status, _, body) = get(app(source()), "/api/tickers").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["count"], 5);
    assert_eq!(json["data"][0]["symbol"], "USDBRL=X");
    assert_eq!(json["data"][0]["pair"], "USD/BRL");

    let (_, _, body) = get(app(source()), "/api/periods").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["default"], "1 year");
    assert_eq!(json["data"][3]["start"], "2019-01-01");
}

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get(app(source()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}
