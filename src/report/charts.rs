//! Inline SVG charts shared by the statistics page and the report.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::ChartRow;
use crate::views::escape;

pub const COLORS: [&str; 7] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d", "#ffc658",
];

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 300.0;
const MARGIN: f64 = 40.0;

pub fn color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// Vertical bars, one per candidate, scaled to the highest count.
pub fn bar_chart(rows: &[ChartRow]) -> String {
    let mut svg = open_svg("Votos por candidato");
    if rows.is_empty() {
        empty_notice(&mut svg);
        svg.push_str("</svg>");
        return svg;
    }

    let max = rows.iter().map(|row| row.votes).max().unwrap_or(0).max(1) as f64;
    let plot_height = HEIGHT - 2.0 * MARGIN;
    let slot = (WIDTH - 2.0 * MARGIN) / rows.len() as f64;
    let bar_width = slot * 0.6;
    let baseline = HEIGHT - MARGIN;

    svg.push_str(&format!(
        r##"<line x1="{m}" y1="{b}" x2="{w}" y2="{b}" stroke="#999"/>"##,
        m = MARGIN,
        b = baseline,
        w = WIDTH - MARGIN
    ));

    for (i, row) in rows.iter().enumerate() {
        let height = row.votes as f64 / max * plot_height;
        let x = MARGIN + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = baseline - height;
        let center = x + bar_width / 2.0;
        svg.push_str(&format!(
            r#"<g><title>{name}: {votes} votos</title><rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{h:.1}" fill="{fill}"/></g>"#,
            name = escape(&row.full_name),
            votes = row.votes,
            bw = bar_width,
            h = height,
            fill = color(i),
        ));
        svg.push_str(&format!(
            r#"<text x="{center:.1}" y="{ty:.1}" text-anchor="middle" font-size="12">{votes}</text>"#,
            ty = y - 4.0,
            votes = row.votes,
        ));
        svg.push_str(&format!(
            r#"<text x="{center:.1}" y="{ly:.1}" text-anchor="middle" font-size="12">{label}</text>"#,
            ly = baseline + 16.0,
            label = escape(&row.label),
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Share of the total vote per candidate.
pub fn pie_chart(rows: &[ChartRow]) -> String {
    let mut svg = open_svg("Distribución de votos");
    let total: u64 = rows.iter().map(|row| row.votes).sum();
    if total == 0 {
        empty_notice(&mut svg);
        svg.push_str("</svg>");
        return svg;
    }

    let radius = HEIGHT / 2.0 - MARGIN;
    let (cx, cy) = (WIDTH / 3.0, HEIGHT / 2.0);
    let mut angle = -FRAC_PI_2;

    for (i, row) in rows.iter().enumerate().filter(|(_, row)| row.votes > 0) {
        let share = row.votes as f64 / total as f64;
        let title = format!(
            "<title>{}: {}</title>",
            escape(&row.full_name),
            super::format_percentage(row.percentage)
        );

        if share >= 1.0 {
            svg.push_str(&format!(
                r#"<g>{title}<circle cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{fill}"/></g>"#,
                fill = color(i),
            ));
        } else {
            let end = angle + share * TAU;
            let large_arc = u8::from(share > 0.5);
            svg.push_str(&format!(
                r#"<g>{title}<path d="M{cx:.1},{cy:.1} L{x1:.2},{y1:.2} A{radius:.1},{radius:.1} 0 {large_arc} 1 {x2:.2},{y2:.2} Z" fill="{fill}"/></g>"#,
                x1 = cx + radius * angle.cos(),
                y1 = cy + radius * angle.sin(),
                x2 = cx + radius * end.cos(),
                y2 = cy + radius * end.sin(),
                fill = color(i),
            ));
            angle = end;
        }
    }

    // legend
    let legend_x = WIDTH * 2.0 / 3.0 - MARGIN;
    for (i, row) in rows.iter().enumerate() {
        let y = MARGIN + 22.0 * i as f64;
        svg.push_str(&format!(
            r#"<rect x="{legend_x:.1}" y="{y:.1}" width="12" height="12" fill="{fill}"/><text x="{tx:.1}" y="{ty:.1}" font-size="12">{label}: {pct}</text>"#,
            fill = color(i),
            tx = legend_x + 18.0,
            ty = y + 11.0,
            label = escape(&row.label),
            pct = super::format_percentage(row.percentage),
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn open_svg(label: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="100%" role="img" aria-label="{label}">"#
    )
}

fn empty_notice(svg: &mut String) {
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y}" text-anchor="middle" fill="#666">Sin datos</text>"##,
        x = WIDTH / 2.0,
        y = HEIGHT / 2.0
    ));
}
