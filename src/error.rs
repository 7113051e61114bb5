//! Error types for the FX dashboard

use thiserror::Error;

/// Main error type for the FX dashboard
#[derive(Error, Debug)]
pub enum FxError {
    /// Every requested ticker came back empty
    #[error("No data retrieved for any of the requested tickers")]
    NoData,

    /// The request selected zero currencies
    #[error("No currencies selected")]
    EmptySelection,

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl FxError {
    /// Build a provider error for a ticker
    pub fn provider(symbol: &str, message: impl Into<String>) -> Self {
        FxError::Provider {
            symbol: symbol.to_string(),
            message: message.into(),
        }
    }

    /// True when the failure came from the market-data collaborator
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FxError::Provider { .. } | FxError::Http(_) | FxError::ParseError(_)
        )
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, FxError>;
