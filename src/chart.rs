//! Chart rendering
//!
//! Charts are emitted as standalone SVG documents so they can be embedded in
//! the dashboard page, served directly, or written to disk.

pub mod axis;
pub mod bar;
pub mod line;
pub mod svg;

pub use axis::{assign_axes, Axis};
pub use bar::render_bar_chart;
pub use line::render_line_chart;

use crate::types::{Date, DATE_FORMAT};
use serde::Serialize;

/// A rendered chart ready for embedding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub title: String,
    pub svg: String,
}

/// Pixel size and axis rule shared by both charts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub secondary_axis_ratio: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from(&crate::config::ChartConfig::default())
    }
}

impl From<&crate::config::ChartConfig> for ChartOptions {
    fn from(config: &crate::config::ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            secondary_axis_ratio: config.secondary_axis_ratio,
        }
    }
}

/// Footer caption naming the most recent raw observation
pub fn updated_caption(last_updated: Option<Date>) -> String {
    match last_updated {
        Some(date) => format!("Data updated as of {}", date.format(DATE_FORMAT)),
        None => "Data updated as of: n/a".to_string(),
    }
}
