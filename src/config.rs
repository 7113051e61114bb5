//! Configuration file handling
//!
//! Settings are read from TOML, either from an explicit path or from
//! `~/.emerging-fx/config.toml`. Every field has a default, so an empty or
//! missing file yields a working configuration.

use crate::error::{FxError, Result};
use crate::performance::default_ytd_start;
use crate::types::Date;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

/// Market-data provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout; no timeout when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Read `<symbol>.csv` files from this directory instead of the network
    #[serde(default)]
    pub csv_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_ytd_start")]
    pub ytd_start: Date,
    /// Median ratio above which a series moves to the secondary axis
    #[serde(default = "default_secondary_axis_ratio")]
    pub secondary_axis_ratio: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_base_url() -> String {
    crate::data::sources::yahoo::YAHOO_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_secondary_axis_ratio() -> f64 {
    10.0
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    480
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
            csv_dir: None,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            ytd_start: default_ytd_start(),
            secondary_axis_ratio: default_secondary_axis_ratio(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| FxError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".emerging-fx").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. The default location is
    /// optional; a broken file there is reported and defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            let contents = fs::read_to_string(config_path).map_err(|e| {
                FxError::ConfigError(format!(
                    "Failed to read config {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
            return Self::from_toml_str(&contents);
        }

        if let Some(default_config) = Self::default_path() {
            if default_config.exists() {
                match fs::read_to_string(&default_config)
                    .map_err(FxError::from)
                    .and_then(|c| Self::from_toml_str(&c))
                {
                    Ok(config) => return Ok(config),
                    Err(e) => log::warn!(
                        "Ignoring {}: {}",
                        default_config.display(),
                        e
                    ),
                }
            }
        }

        Ok(Config::default())
    }

    fn validate(&self) -> Result<()> {
        let ratio = self.chart.secondary_axis_ratio;
        if ratio.is_nan() || ratio <= 1.0 {
            return Err(FxError::ConfigError(format!(
                "chart.secondary_axis_ratio must be greater than 1, got {}",
                ratio
            )));
        }
        if self.chart.width < 200 || self.chart.height < 150 {
            return Err(FxError::ConfigError(format!(
                "chart size {}x{} is too small",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }
}
