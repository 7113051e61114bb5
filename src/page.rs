//! HTML page for the dashboard
//!
//! A single self-contained document: selection form on top, then the line
//! chart and the bar chart, each with a heading and an update footer.

use crate::chart::svg::escape;
use crate::chart::{bar::bar_chart_title, updated_caption};
use crate::currency::TICKERS;
use crate::dashboard::{DashboardRequest, DashboardView};
use crate::period::Period;

pub const PAGE_TITLE: &str = "Emerging Market Currencies Dashboard";
pub const PAGE_INTRO: &str =
    "Analysis of emerging-market currencies (Brazil, Argentina, Mexico, India and China)";

const STYLE: &str = "body{font-family:Arial,sans-serif;max-width:1000px;margin:2em auto;color:#222}\
form{display:flex;flex-wrap:wrap;gap:1em;align-items:flex-end;margin-bottom:1.5em}\
fieldset{border:1px solid #ccc}label{margin-right:.8em}\
.caption{color:#666;font-size:.9em}.error{color:#b00020;border:1px solid #b00020;padding:1em}\
svg{max-width:100%;height:auto}";

fn head(out: &mut String) {
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title><style>{}</style></head><body>", PAGE_TITLE, STYLE));
    out.push_str(&format!("<h1>{}</h1><p>{}</p>", PAGE_TITLE, PAGE_INTRO));
}

/// Period selector and currency checkboxes reflecting `request`
fn selection_form(out: &mut String, request: &DashboardRequest) {
    let current = request.period();
    out.push_str("<form method=\"get\" action=\"/\">");
    out.push_str("<input type=\"hidden\" name=\"submitted\" value=\"1\">");

    out.push_str("<label>Select the analysis period: <select name=\"period\">");
    for period in Period::ALL {
        let selected = if period == current { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{label}\"{selected}>{label}</option>",
            label = escape(period.label())
        ));
    }
    out.push_str("</select></label>");

    out.push_str("<fieldset><legend>Select the currencies to analyse:</legend>");
    for ticker in TICKERS.iter() {
        let checked = if request.is_selected(ticker.label) { " checked" } else { "" };
        out.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"currency\" value=\"{label}\"{checked}> {label}</label>",
            label = escape(ticker.label)
        ));
    }
    out.push_str("</fieldset><button type=\"submit\">Update</button></form>");
}

fn chart_section(out: &mut String, heading: &str, svg: &str, footer: &str) {
    out.push_str(&format!("<section><h2>{}</h2>", escape(heading)));
    out.push_str(svg);
    out.push_str(&format!("<p class=\"caption\">{}</p></section>", escape(footer)));
}

/// Full dashboard page
pub fn render_page(view: &DashboardView, request: &DashboardRequest) -> String {
    let mut out = String::with_capacity(view.line_chart.svg.len() + view.bar_chart.svg.len() + 4096);
    head(&mut out);
    selection_form(&mut out, request);

    let footer = updated_caption(view.last_updated);
    chart_section(
        &mut out,
        &format!("Line Chart: {}", view.line_chart.title),
        &view.line_chart.svg,
        &footer,
    );
    chart_section(
        &mut out,
        &format!("Bar Chart: {}", bar_chart_title(view.ytd.year())),
        &view.bar_chart.svg,
        &footer,
    );

    out.push_str("</body></html>");
    out
}

/// Page shown when the pipeline fails; the form stays usable
pub fn render_error_page(message: &str, request: &DashboardRequest) -> String {
    let mut out = String::new();
    head(&mut out);
    selection_form(&mut out, request);
    out.push_str(&format!("<div class=\"error\">{}</div></body></html>", escape(message)));
    out
}
