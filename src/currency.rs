//! Currency types and the ticker registry

use crate::error::{FxError, Result};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Brazilian Real
    BRL,
    /// Argentine Peso
    ARS,
    /// Mexican Peso
    MXN,
    /// Chinese Yuan
    CNY,
    /// Indian Rupee
    INR,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::BRL => "BRL",
            Currency::ARS => "ARS",
            Currency::MXN => "MXN",
            Currency::CNY => "CNY",
            Currency::INR => "INR",
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "BRL" => Some(Currency::BRL),
            "ARS" => Some(Currency::ARS),
            "MXN" => Some(Currency::MXN),
            "CNY" => Some(Currency::CNY),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currency pair for exchange rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create new currency pair
    pub const fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A tracked ticker: provider symbol plus the label shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ticker {
    pub symbol: &'static str,
    pub label: &'static str,
    pub pair: CurrencyPair,
}

/// Tracked tickers in canonical column order
pub const TICKERS: [Ticker; 5] = [
    Ticker {
        symbol: "USDBRL=X",
        label: "Real (BRL)",
        pair: CurrencyPair::new(Currency::USD, Currency::BRL),
    },
    Ticker {
        symbol: "USDARS=X",
        label: "Argentine Peso (ARS)",
        pair: CurrencyPair::new(Currency::USD, Currency::ARS),
    },
    Ticker {
        symbol: "USDMXN=X",
        label: "Mexican Peso (MXN)",
        pair: CurrencyPair::new(Currency::USD, Currency::MXN),
    },
    Ticker {
        symbol: "USDCNY=X",
        label: "Chinese Yuan (CNY)",
        pair: CurrencyPair::new(Currency::USD, Currency::CNY),
    },
    Ticker {
        symbol: "USDINR=X",
        label: "Indian Rupee (INR)",
        pair: CurrencyPair::new(Currency::USD, Currency::INR),
    },
];

/// Display label for a provider symbol
pub fn label_for(symbol: &str) -> Option<&'static str> {
    TICKERS.iter().find(|t| t.symbol == symbol).map(|t| t.label)
}

/// Provider symbol for a display label
pub fn symbol_for(label: &str) -> Option<&'static str> {
    TICKERS.iter().find(|t| t.label == label).map(|t| t.symbol)
}

/// Resolve a user-supplied currency to its display label.
///
/// Accepts either a display label ("Real (BRL)") or the quote currency's ISO
/// code ("brl").
pub fn resolve_label(input: &str) -> Result<&'static str> {
    let input = input.trim();
    if let Some(ticker) = TICKERS.iter().find(|t| t.label == input) {
        return Ok(ticker.label);
    }

    Currency::from_code(input)
        .and_then(|code| TICKERS.iter().find(|t| t.pair.quote == code))
        .map(|t| t.label)
        .ok_or_else(|| FxError::UnknownCurrency(input.to_string()))
}

/// All display labels, the default selection
pub fn all_labels() -> Vec<&'static str> {
    TICKERS.iter().map(|t| t.label).collect()
}

/// Registry entries matching a label selection, in registry order.
///
/// Unknown labels are dropped with a warning.
pub fn select_by_labels<S: AsRef<str>>(labels: &[S]) -> Vec<Ticker> {
    let wanted: HashSet<&str> = labels.iter().map(|l| l.as_ref()).collect();

    for label in &wanted {
        if symbol_for(label).is_none() {
            log::warn!("Ignoring unknown currency label: {}", label);
        }
    }

    TICKERS
        .iter()
        .filter(|t| wanted.contains(t.label))
        .copied()
        .collect()
}
