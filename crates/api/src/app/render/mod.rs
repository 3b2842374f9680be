//! HTML presenter.
//!
//! The only code that knows about markup. Takes a finished
//! [`DashboardView`] and produces a self-contained page.

use std::fmt::Write as FmtWrite;

use stockwatch_inventory::{ClassifiedItem, Dataset, DashboardView, SelectionRange};

pub mod chart;

const PAGE_TITLE: &str = "🛠️ Demo Electromechanical Inventory Dashboard";
const HEADING: &str = "🎛️ Ánalisis de inventario MATELPA";
const CAPTION: &str =
    "Demo with hard\u{2011}coded electromechanical items\u{2014}swap. NOT suited for commercial use yet.";

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; color: #262730; display: flex; }
aside { width: 260px; min-height: 100vh; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
main { flex: 1; padding: 1.5rem 3rem; }
label { display: block; margin: 1rem 0 .25rem; }
input[type=number] { width: 100%; box-sizing: border-box; }
.metrics { display: flex; gap: 4rem; }
.metric .label { font-size: .9rem; }
.metric .value { font-size: 2.2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #e6e6e6; padding: .3rem .6rem; text-align: left; }
td.num { text-align: right; }
.caption { color: #808495; font-size: .85rem; }
"#;

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full dashboard page.
pub fn page(view: &DashboardView, dataset: &Dataset) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, r#"<html lang="es"><head><meta charset="utf-8">"#);
    let _ = writeln!(html, "<title>{}</title>", escape(PAGE_TITLE));
    let _ = writeln!(html, "<style>{STYLE}</style></head><body>");

    html.push_str(&sidebar(view));

    let _ = writeln!(html, "<main>");
    let _ = writeln!(html, "<h1>{}</h1>", escape(HEADING));
    let _ = writeln!(
        html,
        r#"<div class="metrics">{}{}</div>"#,
        metric("📦 Total SKUs", view.total_skus),
        metric("⚠️ Items Out-of-Bounds", view.out_of_bounds)
    );
    let _ = writeln!(html, "<hr>");

    let _ = writeln!(html, "<h3>🔻 Top {} Under-Minimum Items</h3>", view.n_under);
    html.push_str(&table("top-under", &view.top_under));
    let _ = writeln!(html, "<h3>🔺 Top {} Over-Maximum Items</h3>", view.n_over);
    html.push_str(&table("top-over", &view.top_over));

    let _ = writeln!(html, "<h3>📊 Deviation from Threshold</h3>");
    html.push_str(&chart::deviation_chart(&view.chart));

    let _ = writeln!(html, "\n<hr>");
    let _ = writeln!(html, r#"<p class="caption">{}</p>"#, escape(CAPTION));
    let _ = writeln!(
        html,
        r#"<p class="caption">Dataset generation {} created {}.</p>"#,
        dataset.generation(),
        dataset.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(html, "</main></body></html>");
    html
}

fn sidebar(view: &DashboardView) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<aside><h2>🔢 Alert Configuration</h2>");
    let _ = writeln!(html, r#"<form method="get" action="/">"#);
    html.push_str(&count_input(
        "n_under",
        "📉 Top Under-Min Items",
        "Number of items below minimum to display",
        &view.under_range,
        view.n_under,
    ));
    html.push_str(&count_input(
        "n_over",
        "📈 Top Over-Max Items",
        "Number of items above maximum to display",
        &view.over_range,
        view.n_over,
    ));
    let _ = writeln!(html, r#"<p><button type="submit">Apply</button></p></form>"#);
    let _ = writeln!(
        html,
        r#"<form method="post" action="/regenerate"><input type="hidden" name="n_under" value="{}"><input type="hidden" name="n_over" value="{}"><button type="submit">Regenerate data</button></form></aside>"#,
        view.n_under, view.n_over
    );
    html
}

fn count_input(name: &str, label: &str, help: &str, range: &SelectionRange, value: usize) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" title="{help}">
"#,
        label = escape(label),
        help = escape(help),
        min = range.min,
        max = range.max,
    )
}

fn metric(label: &str, value: usize) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{value}</div></div>"#,
        escape(label)
    )
}

fn table(id: &str, rows: &[ClassifiedItem]) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        r#"<table id="{id}"><thead><tr><th>Item</th><th>Qty</th><th>MinQty</th><th>MaxQty</th><th>Status</th><th>Diff</th></tr></thead><tbody>"#
    );
    if rows.is_empty() {
        let _ = writeln!(html, r#"<tr><td colspan="6">No items</td></tr>"#);
    }
    for row in rows {
        let item = row.item();
        let _ = writeln!(
            html,
            r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td>{}</td><td class="num">{}</td></tr>"#,
            escape(item.item()),
            item.qty(),
            item.min_qty(),
            item.max_qty(),
            row.status(),
            row.diff()
        );
    }
    let _ = writeln!(html, "</tbody></table>");
    html
}
