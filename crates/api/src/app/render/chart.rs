//! Horizontal deviation bar chart as inline SVG.
//!
//! One bar per item, length = Diff, sorted by Diff descending, colored by
//! status. Each bar carries a `<title>` tooltip.

use std::fmt::Write as FmtWrite;

use stockwatch_inventory::{ClassifiedItem, Status};

use super::escape;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;

pub const UNDER_MIN_COLOR: &str = "#1f77b4";
pub const OVER_MAX_COLOR: &str = "#d62728";

const MARGIN_LEFT: f64 = 180.0;
const MARGIN_RIGHT: f64 = 130.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 48.0;
const TARGET_TICKS: i64 = 6;

pub fn status_color(status: Status) -> &'static str {
    match status {
        Status::UnderMin => UNDER_MIN_COLOR,
        Status::OverMax => OVER_MAX_COLOR,
        Status::Ok => "#7f7f7f",
    }
}

/// Render the chart. An empty input yields a placeholder SVG.
pub fn deviation_chart(rows: &[ClassifiedItem]) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="chart" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    );

    if rows.is_empty() {
        let _ = writeln!(
            svg,
            r##"  <text x="{}" y="{}" text-anchor="middle" fill="#666">No out-of-bounds items</text>"##,
            WIDTH / 2.0,
            HEIGHT / 2.0
        );
        svg.push_str("</svg>");
        return svg;
    }

    let mut bars: Vec<&ClassifiedItem> = rows.iter().collect();
    bars.sort_by(|a, b| b.diff().cmp(&a.diff()));

    let lo = bars.iter().map(|r| r.diff()).min().unwrap_or(0).min(0);
    let hi = bars.iter().map(|r| r.diff()).max().unwrap_or(0).max(0);
    let step = tick_step(hi - lo);
    let lo = floor_to(lo, step);
    let hi = ceil_to(hi, step);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x = |v: i64| MARGIN_LEFT + (v - lo) as f64 / (hi - lo) as f64 * plot_w;
    let band = plot_h / bars.len() as f64;
    let bar_h = band * 0.8;

    // Grid + tick labels.
    let axis_y = MARGIN_TOP + plot_h;
    let mut t = lo;
    while t <= hi {
        let tx = x(t);
        let _ = writeln!(
            svg,
            r##"  <line x1="{tx:.1}" y1="{MARGIN_TOP}" x2="{tx:.1}" y2="{axis_y:.1}" stroke="#e6e6e6"/>"##
        );
        let _ = writeln!(
            svg,
            r##"  <text x="{tx:.1}" y="{:.1}" text-anchor="middle" fill="#333">{t}</text>"##,
            axis_y + 14.0
        );
        t += step;
    }
    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-weight="bold" fill="#333">Qty − Threshold</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 10.0
    );

    for (i, row) in bars.iter().enumerate() {
        let y = MARGIN_TOP + band * i as f64 + (band - bar_h) / 2.0;
        let x0 = x(row.diff().min(0));
        let x1 = x(row.diff().max(0));
        let item = row.item();
        let name = escape(row.name());
        let _ = writeln!(
            svg,
            r#"  <rect class="bar" data-status="{status}" x="{x0:.1}" y="{y:.1}" width="{w:.1}" height="{bar_h:.1}" fill="{color}"><title>Item: {name}&#10;Qty: {qty}&#10;MinQty: {min}&#10;MaxQty: {max}&#10;Diff: {diff}</title></rect>"#,
            status = row.status().label(),
            w = x1 - x0,
            color = status_color(row.status()),
            qty = item.qty(),
            min = item.min_qty(),
            max = item.max_qty(),
            diff = row.diff(),
        );
        let _ = writeln!(
            svg,
            r##"  <text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" fill="#333">{name}</text>"##,
            MARGIN_LEFT - 6.0,
            y + bar_h / 2.0
        );
    }

    // Zero line + legend.
    let zx = x(0);
    let _ = writeln!(
        svg,
        r##"  <line x1="{zx:.1}" y1="{MARGIN_TOP}" x2="{zx:.1}" y2="{axis_y:.1}" stroke="#333"/>"##
    );
    let lx = WIDTH - MARGIN_RIGHT + 16.0;
    let _ = writeln!(
        svg,
        r##"  <g class="legend"><text x="{lx}" y="{:.1}" font-weight="bold" fill="#333">Status</text>"##,
        MARGIN_TOP + 12.0
    );
    for (i, status) in [Status::UnderMin, Status::OverMax].into_iter().enumerate() {
        let ly = MARGIN_TOP + 24.0 + i as f64 * 18.0;
        let _ = writeln!(
            svg,
            r##"    <rect x="{lx}" y="{ly:.1}" width="12" height="12" fill="{}"/><text x="{:.1}" y="{:.1}" fill="#333">{}</text>"##,
            status_color(status),
            lx + 18.0,
            ly + 10.0,
            status.label()
        );
    }
    svg.push_str("  </g>\n</svg>");
    svg
}

/// Smallest 1/2/5 × 10^k step giving at most `TARGET_TICKS` intervals.
fn tick_step(span: i64) -> i64 {
    let raw = (span.max(1) + TARGET_TICKS - 1) / TARGET_TICKS;
    let mut magnitude = 1;
    loop {
        for m in [1, 2, 5] {
            if m * magnitude >= raw {
                return m * magnitude;
            }
        }
        magnitude *= 10;
    }
}

fn floor_to(v: i64, step: i64) -> i64 {
    v.div_euclid(step) * step
}

fn ceil_to(v: i64, step: i64) -> i64 {
    -(-v).div_euclid(step) * step
}
