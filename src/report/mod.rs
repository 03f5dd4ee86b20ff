//! Vote tallies: ordering, charts and the downloadable report.

pub mod charts;
mod document;

use crate::api::models::CandidateResult;

pub use document::{REPORT_TITLE, file_name, render};

/// A candidate as drawn in the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    /// Last word of the name, short enough for an axis label.
    pub label: String,
    pub full_name: String,
    pub votes: u64,
    pub percentage: f64,
}

/// Most voted first. Ties keep the order the API returned them in.
pub fn sort_results(results: &[CandidateResult]) -> Vec<CandidateResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| b.votos.cmp(&a.votos));
    sorted
}

pub fn leader(sorted: &[CandidateResult]) -> Option<&CandidateResult> {
    sorted.first()
}

pub fn chart_rows(sorted: &[CandidateResult]) -> Vec<ChartRow> {
    sorted
        .iter()
        .map(|result| ChartRow {
            label: short_label(&result.nombre),
            full_name: result.nombre.clone(),
            votes: result.votos,
            percentage: result.porcentaje,
        })
        .collect()
}

fn short_label(name: &str) -> String {
    name.split_whitespace()
        .next_back()
        .unwrap_or(name)
        .to_string()
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}
