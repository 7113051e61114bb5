//! Tests for error formatting and classification

use emerging_fx::error::FxError;

#[test]
fn test_no_data_message() {
    let msg = FxError::NoData.to_string();
    assert!(msg.contains("No data retrieved"));
    assert!(!FxError::NoData.is_upstream());
}

#[test]
fn test_provider_error_names_symbol() {
    let err = FxError::provider("USDARS=X", "HTTP 429 Too Many Requests");
    let msg = err.to_string();
    assert!(msg.contains("USDARS=X"));
    assert!(msg.contains("429"));
    assert!(err.is_upstream());
}

#[test]
fn test_parse_error_is_upstream() {
    let err = FxError::ParseError("unexpected chart body".to_string());
    assert!(err.is_upstream());
    assert!(err.to_string().starts_with("Parse error"));
}

#[test]
fn test_local_errors_are_not_upstream() {
    let io = FxError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml"));
    assert!(!io.is_upstream());
    assert!(io.to_string().contains("config.toml"));

    assert!(!FxError::ConfigError("bad ratio".into()).is_upstream());
    assert!(!FxError::EmptySelection.is_upstream());
}

#[test]
fn test_serde_error_conversion() {
    let err: FxError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, FxError::SerdeError(_)));
}
