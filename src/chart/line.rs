//! Monthly average line chart with an optional secondary axis

use super::axis::{assign_axes, Axis};
use super::svg::{self, Frame, AXIS_COLOR, GRID_COLOR, PALETTE};
use super::{updated_caption, ChartOptions, RenderedChart};
use crate::data::{Column, PriceTable};
use crate::types::Date;

pub const LINE_CHART_TITLE: &str = "Monthly Average Values";

const TARGET_TICKS: usize = 6;
const MAX_DATE_LABELS: usize = 8;

struct Scale {
    min: f64,
    max: f64,
    ticks: Vec<f64>,
}

impl Scale {
    fn for_columns<'a>(columns: impl Iterator<Item = &'a Column>) -> Option<Self> {
        let (min, max) = svg::extent(columns.flat_map(|c| c.observed()), false)?;
        let (min, max, ticks) = svg::nice_ticks(min, max, TARGET_TICKS);
        Some(Self { min, max, ticks })
    }
}

/// Horizontal position of each date as a fraction of the time span
fn date_fractions(dates: &[Date]) -> Vec<f64> {
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return Vec::new();
    };
    let span = (*last - *first).num_days() as f64;
    if span <= 0.0 {
        return vec![0.5; dates.len()];
    }
    dates
        .iter()
        .map(|d| (*d - *first).num_days() as f64 / span)
        .collect()
}

/// Contiguous runs of observed points; a missing value breaks the line
fn segments(xs: &[f64], values: &[Option<f64>], frame: &Frame, scale: &Scale) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (x, value) in xs.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((*x, frame.y_at(*v, scale.min, scale.max))),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

fn draw_series(svg: &mut String, runs: &[Vec<(f64, f64)>], color: &str) {
    for run in runs {
        if let [(x, y)] = run.as_slice() {
            svg.push_str(&format!(
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="2.5" fill="{color}"/>"#
            ));
            continue;
        }
        let points = run
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"/>"#
        ));
    }
}

/// Legend box; `right_aligned` anchors it to the upper-right corner
fn draw_legend(svg: &mut String, frame: &Frame, entries: &[(&str, &str)], right_aligned: bool) {
    let mut y = frame.plot_top() + 16.0;
    for (label, color) in entries {
        let (x1, x2, tx, anchor) = if right_aligned {
            let x2 = frame.plot_right() - 10.0;
            (x2 - 20.0, x2, x2 - 26.0, "end")
        } else {
            let x1 = frame.plot_left() + 10.0;
            (x1, x1 + 20.0, x1 + 26.0, "start")
        };
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="2"/>"#,
            ly = y - 4.0
        ));
        svg::text(svg, tx, y, anchor, label);
        y += 16.0;
    }
}

fn draw_value_axis(svg: &mut String, frame: &Frame, scale: &Scale, right: bool, gridlines: bool) {
    let x = if right { frame.plot_right() } else { frame.plot_left() };
    svg::line(svg, x, frame.plot_top(), x, frame.plot_bottom(), AXIS_COLOR, None);

    for tick in &scale.ticks {
        let y = frame.y_at(*tick, scale.min, scale.max);
        if gridlines {
            svg::line(svg, frame.plot_left(), y, frame.plot_right(), y, GRID_COLOR, None);
        }
        let (tx, anchor) = if right { (x + 6.0, "start") } else { (x - 6.0, "end") };
        svg::text(svg, tx, y + 4.0, anchor, &svg::format_tick(*tick));
    }
}

fn draw_date_axis(svg: &mut String, frame: &Frame, dates: &[Date], xs: &[f64]) {
    let y = frame.plot_bottom();
    svg::line(svg, frame.plot_left(), y, frame.plot_right(), y, AXIS_COLOR, None);

    let step = dates.len().div_ceil(MAX_DATE_LABELS).max(1);
    for (date, x) in dates.iter().zip(xs).step_by(step) {
        svg::line(svg, *x, frame.plot_top(), *x, y, GRID_COLOR, None);
        svg::text(svg, *x, y + 18.0, "middle", &date.format("%Y-%m").to_string());
    }

    svg::text(svg, frame.center_x(), y + 40.0, "middle", "Date");
}

/// Render the monthly table as a line chart.
///
/// Series whose scale dwarfs the others are drawn against a right-hand axis.
pub fn render_line_chart(
    monthly: &PriceTable,
    last_updated: Option<Date>,
    options: &ChartOptions,
) -> RenderedChart {
    let frame = Frame::new(options.width, options.height);
    let mut out = svg::svg_header(options.width, options.height);
    svg::title(&mut out, &frame, LINE_CHART_TITLE);

    let axes = assign_axes(monthly.columns(), options.secondary_axis_ratio);
    let pick = |axis: Axis| {
        monthly
            .columns()
            .iter()
            .zip(&axes)
            .filter(move |(_, a)| **a == axis)
            .map(|(c, _)| c)
    };

    let primary = Scale::for_columns(pick(Axis::Primary));
    let secondary = Scale::for_columns(pick(Axis::Secondary));

    if monthly.is_empty() || primary.is_none() && secondary.is_none() {
        svg::placeholder(&mut out, &frame, "No data for the selected period");
    } else {
        let xs: Vec<f64> = date_fractions(monthly.dates())
            .into_iter()
            .map(|f| frame.x_at(f))
            .collect();

        if let Some(scale) = &primary {
            draw_value_axis(&mut out, &frame, scale, false, true);
        }
        if let Some(scale) = &secondary {
            draw_value_axis(&mut out, &frame, scale, true, primary.is_none());
        }
        draw_date_axis(&mut out, &frame, monthly.dates(), &xs);

        let mut primary_legend = Vec::new();
        let mut secondary_legend = Vec::new();
        for (i, (column, axis)) in monthly.columns().iter().zip(&axes).enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let scale = match axis {
                Axis::Primary => primary.as_ref(),
                Axis::Secondary => secondary.as_ref(),
            };
            let Some(scale) = scale else { continue };

            draw_series(&mut out, &segments(&xs, column.values(), &frame, scale), color);
            match axis {
                Axis::Primary => primary_legend.push((column.name(), color)),
                Axis::Secondary => secondary_legend.push((column.name(), color)),
            }
        }

        let left_label = if secondary_legend.is_empty() {
            "Exchange Rate".to_string()
        } else {
            "Exchange Rate (other currencies)".to_string()
        };
        let mid_y = frame.plot_top() + frame.plot_height() / 2.0;
        svg::vertical_text(&mut out, frame.plot_left() - 55.0, mid_y, &left_label);

        if !secondary_legend.is_empty() {
            let names: Vec<&str> = secondary_legend.iter().map(|(n, _)| *n).collect();
            let right_label = format!("Exchange Rate ({})", names.join(", "));
            svg::vertical_text(&mut out, frame.plot_right() + 60.0, mid_y, &right_label);
        }

        draw_legend(&mut out, &frame, &primary_legend, false);
        draw_legend(&mut out, &frame, &secondary_legend, true);
    }

    svg::caption(&mut out, &frame, &updated_caption(last_updated));
    out.push_str(svg::svg_footer());

    RenderedChart {
        title: LINE_CHART_TITLE.to_string(),
        svg: out,
    }
}
