//! SVG building blocks shared by the line and bar charts

/// Series colors, assigned by column position
pub const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];
pub const GRID_COLOR: &str = "#dddddd";
pub const AXIS_COLOR: &str = "#333333";
pub const TEXT_COLOR: &str = "#444444";

/// Plot area inside the SVG canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            left: 80.0,
            right: 80.0,
            top: 50.0,
            bottom: 80.0,
        }
    }

    pub fn plot_left(&self) -> f64 {
        self.left
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.right
    }

    pub fn plot_top(&self) -> f64 {
        self.top
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn plot_width(&self) -> f64 {
        self.plot_right() - self.plot_left()
    }

    pub fn plot_height(&self) -> f64 {
        self.plot_bottom() - self.plot_top()
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Map a value in `[min, max]` to a y pixel (larger values higher up)
    pub fn y_at(&self, value: f64, min: f64, max: f64) -> f64 {
        if (max - min).abs() < f64::EPSILON {
            return self.plot_top() + self.plot_height() / 2.0;
        }
        let norm = (value - min) / (max - min);
        self.plot_bottom() - norm * self.plot_height()
    }

    /// Map a fraction of the horizontal extent to an x pixel
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.plot_left() + fraction * self.plot_width()
    }
}

/// Escape text for use inside SVG elements and attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn svg_header(width: u32, height: u32) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:{text}}}</style><rect width="{w}" height="{h}" fill="#ffffff"/>"##,
        w = width,
        h = height,
        text = TEXT_COLOR
    )
}

pub fn svg_footer() -> &'static str {
    "</svg>"
}

/// Min/max over finite values, widened when flat; `None` with no values
pub fn extent<I>(values: I, include_zero: bool) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;

    for value in values.into_iter().filter(|v| v.is_finite()) {
        min_v = min_v.min(value);
        max_v = max_v.max(value);
    }

    if include_zero {
        min_v = min_v.min(0.0);
        max_v = max_v.max(0.0);
    }

    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }

    if min_v == max_v {
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 };
        min_v -= adjust;
        max_v += adjust;
    }

    Some((min_v, max_v))
}

/// Upper bound on ticks per axis
const MAX_TICKS: usize = 50;

/// Round tick positions covering `[min, max]` with roughly `target` steps.
///
/// Returns the widened bounds and the ticks between them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (f64, f64, Vec<f64>) {
    let span = (max - min).abs().max(f64::EPSILON);
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let lo = (min / step).floor() * step;
    let hi = (max / step).ceil() * step;

    let count = ((hi - lo) / step).round().clamp(0.0, MAX_TICKS as f64) as usize;
    let ticks = (0..=count)
        // Snap away float noise like 0.30000000000000004
        .map(|k| ((lo + k as f64 * step) / step).round() * step)
        .collect();

    (lo, hi, ticks)
}

/// Short tick label
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 100.0 {
        format!("{:.0}", value)
    } else if abs >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn line(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, dash: Option<&str>) {
    let dash_attr = dash
        .map(|d| format!(r#" stroke-dasharray="{}""#, d))
        .unwrap_or_default();
    svg.push_str(&format!(
        r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="1"{dash_attr}/>"#
    ));
}

pub fn text(svg: &mut String, x: f64, y: f64, anchor: &str, content: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}">{}</text>"#,
        escape(content)
    ));
}

/// Text rotated -90 degrees around its anchor, for vertical axis labels
pub fn vertical_text(svg: &mut String, x: f64, y: f64, content: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {y:.2})">{}</text>"#,
        escape(content)
    ));
}

pub fn title(svg: &mut String, frame: &Frame, content: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="15" font-weight="bold">{}</text>"#,
        escape(content),
        x = frame.center_x(),
        y = frame.plot_top() - 20.0
    ));
}

/// "Data updated as of" line under the plot
pub fn caption(svg: &mut String, frame: &Frame, content: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="10">{}</text>"#,
        escape(content),
        x = frame.center_x(),
        y = frame.height - 10.0
    ));
}

/// Message drawn in place of a plot when there is nothing to show
pub fn placeholder(svg: &mut String, frame: &Frame, content: &str) {
    text(
        svg,
        frame.center_x(),
        frame.plot_top() + frame.plot_height() / 2.0,
        "middle",
        content,
    );
}
