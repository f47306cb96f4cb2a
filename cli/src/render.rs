//! Plain-text output.

use std::fmt::Write;

use scout_retrieval::{IndexReport, QueryReport, ScoredScenario};

const SCENARIO_WIDTH: usize = 72;

pub fn index_summary(report: &IndexReport) -> String {
    format!(
        "Indexed {} scenarios from {} files into {}",
        report.scenarios_indexed,
        report.files_scanned,
        report.store_path.display()
    )
}

/// Selected scenarios, or the `top` best ones when requested.
pub fn query_table(report: &QueryReport, top: Option<usize>) -> String {
    let rows: Vec<&ScoredScenario> = match top {
        Some(k) => report.top(k),
        None => report.matched().collect(),
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} of {} scenarios at or above {}",
        report.matches.len(),
        report.scores.len(),
        report.threshold
    );
    if let Some(best) = &report.best {
        let _ = writeln!(
            out,
            "Best: {} ({:.4})",
            best.origin_id, best.similarity
        );
    }
    if rows.is_empty() {
        return out;
    }

    let origin_width = rows
        .iter()
        .map(|s| s.origin_id.len())
        .max()
        .unwrap_or(0)
        .max("ORIGIN".len());

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>5}  {:>10}  {:<origin_width$}  SCENARIO",
        "INDEX", "SIMILARITY", "ORIGIN"
    );
    for scored in rows {
        let marker = if report.matches.contains(&scored.index) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{:>5}  {:>9.4}{marker}  {:<origin_width$}  {}",
            scored.index,
            scored.similarity,
            scored.origin_id,
            truncate(scored.scenario_text.trim_end(), SCENARIO_WIDTH)
        );
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
