//! YTD variation bar chart

use super::svg::{self, Frame, AXIS_COLOR};
use super::{updated_caption, ChartOptions, RenderedChart};
use crate::performance::YtdVariation;
use crate::types::Date;

const BAR_COLOR: &str = "#87ceeb";
const GRID_DASH: &str = "4 3";
const TARGET_TICKS: usize = 6;

/// Title for the YTD chart of a given year
pub fn bar_chart_title(year: i32) -> String {
    format!("Cumulative YTD {} Variation", year)
}

/// Bar annotation, two decimals with a trailing percent sign
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Render one bar per currency, annotated with its percentage
pub fn render_bar_chart(
    ytd: &YtdVariation,
    last_updated: Option<Date>,
    options: &ChartOptions,
) -> RenderedChart {
    let title = bar_chart_title(ytd.year());
    let frame = Frame::new(options.width, options.height);
    let mut out = svg::svg_header(options.width, options.height);
    svg::title(&mut out, &frame, &title);

    let extent = svg::extent(ytd.rows.iter().map(|r| r.variation_pct), true);

    match extent {
        Some((min, max)) if !ytd.is_empty() => {
            let (min, max, ticks) = svg::nice_ticks(min, max, TARGET_TICKS);

            // Horizontal gridlines only
            for tick in &ticks {
                let y = frame.y_at(*tick, min, max);
                svg::line(&mut out, frame.plot_left(), y, frame.plot_right(), y, "#bbbbbb", Some(GRID_DASH));
                svg::text(&mut out, frame.plot_left() - 6.0, y + 4.0, "end", &svg::format_tick(*tick));
            }

            let zero_y = frame.y_at(0.0, min, max);
            let slot = frame.plot_width() / ytd.rows.len() as f64;
            let bar_width = slot * 0.5;

            for (i, row) in ytd.rows.iter().enumerate() {
                let center = frame.plot_left() + slot * (i as f64 + 0.5);
                let value_y = frame.y_at(row.variation_pct, min, max);
                let (top, height) = if value_y <= zero_y {
                    (value_y, zero_y - value_y)
                } else {
                    (zero_y, value_y - zero_y)
                };

                out.push_str(&format!(
                    r#"<rect x="{x:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{BAR_COLOR}"/>"#,
                    x = center - bar_width / 2.0
                ));

                // Label sits just past the bar's outer edge
                let label_y = if row.variation_pct >= 0.0 {
                    top - 3.0
                } else {
                    top + height + 13.0
                };
                svg::text(&mut out, center, label_y, "middle", &format_pct(row.variation_pct));
                svg::text(&mut out, center, frame.plot_bottom() + 18.0, "middle", &row.currency);
            }

            svg::line(&mut out, frame.plot_left(), zero_y, frame.plot_right(), zero_y, AXIS_COLOR, None);
            svg::line(
                &mut out,
                frame.plot_left(),
                frame.plot_top(),
                frame.plot_left(),
                frame.plot_bottom(),
                AXIS_COLOR,
                None,
            );
        }
        _ => {
            let message = format!("No observations since {}", ytd.start);
            svg::placeholder(&mut out, &frame, &message);
        }
    }

    let mid_y = frame.plot_top() + frame.plot_height() / 2.0;
    svg::vertical_text(&mut out, frame.plot_left() - 55.0, mid_y, "Variation (%)");
    svg::text(&mut out, frame.center_x(), frame.plot_bottom() + 40.0, "middle", "Currency");
    svg::caption(&mut out, &frame, &updated_caption(last_updated));
    out.push_str(svg::svg_footer());

    RenderedChart { title, svg: out }
}
