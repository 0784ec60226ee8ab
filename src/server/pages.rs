//! HTML rendering for the form page
//!
//! The page is small enough that a template engine would be overkill;
//! everything is built with `format!` and escaped by hand.

use crate::resolver::{format_date, VarReport};
use std::fmt::Write;

/// Escape text for interpolation into HTML
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the single-page form, optionally with a computed report or
/// an error banner.
pub fn render_index(assets: &[String], report: Option<&VarReport>, error: Option<&str>) -> String {
    let mut options = String::new();
    for asset in assets {
        let a = escape(asset);
        let _ = write!(options, r#"<option value="{a}">{a}</option>"#);
    }

    let banner = match error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        None => String::new(),
    };

    let result_block = match report {
        Some(r) => render_report(r),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Historical VaR</title>
<style>
body {{ font-family: sans-serif; margin: 2em; max-width: 60em; }}
label {{ display: block; margin-top: 0.8em; }}
table {{ border-collapse: collapse; margin-top: 1em; }}
th, td {{ border: 1px solid #ccc; padding: 0.3em 0.7em; text-align: right; }}
th {{ background: #f0f0f0; }}
.error {{ color: #b00020; }}
.figure {{ font-size: 1.3em; }}
</style>
</head>
<body>
<h1>Historical-Simulation VaR</h1>
{banner}
<form method="post" action="/">
<label>Analysis date (DD/MM/YYYY)
<input type="text" name="date" placeholder="leave blank for latest position date"></label>
<label>Asset
<select name="asset">{options}</select></label>
<label>Confidence
<input type="number" name="confidence" step="0.01" min="0.5" max="0.999" placeholder="0.95"></label>
<button type="submit">Compute VaR</button>
</form>
{result_block}
</body>
</html>"#
    )
}

fn render_report(r: &VarReport) -> String {
    let mut rows = String::new();
    for sim in &r.simulations {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{:.6}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            sim.date, sim.shock, sim.simulated_price, sim.mtm_simulated, sim.pnl
        );
    }

    format!(
        r#"<h2>Result</h2>
<p>Asset: <b>{entity}</b> · Date: {date} · Nominal: {nominal} · Confidence: {conf:.0}%</p>
<p>Price range: {first} to {last} ({prices} prices, {shocks} shocks)</p>
<p>Base price: {base:.2} · MtM base: {mtm:.2}</p>
<p class="figure">VaR ({conf:.0}%): <b>{var:.2}</b> (raw percentile {pct:.2})</p>
<h3>Simulations</h3>
<table>
<tr><th>Date</th><th>Shock</th><th>Simulated price</th><th>Simulated MtM</th><th>P&amp;L</th></tr>
{rows}
</table>"#,
        entity = escape(&r.entity_id),
        date = format_date(r.analysis_date),
        nominal = r.nominal,
        conf = r.confidence * 100.0,
        first = format_date(r.first_date),
        last = format_date(r.last_date),
        prices = r.num_prices,
        shocks = r.num_shocks,
        base = r.result.base_price,
        mtm = r.result.mtm_base,
        var = r.result.var,
        pct = r.result.percentile_value,
    )
}
