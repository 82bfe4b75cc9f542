//! Reporting and export payloads
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output for identical ledgers

use crate::ledger::{Assessment, Ledger};
use crate::risk::RiskLevel;
use crate::tram::MembershipPoint;
use serde::Serialize;

/// Filters applied to report rows
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub min_score: Option<f64>,
    pub top_n: Option<usize>,
}

/// One exported assessment row
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ExportRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub category: String,
    pub hazard: String,
    pub consequence: String,
    pub exposure: String,
    pub probability: String,
    pub score: f64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vikor_score: Option<f64>,
}

impl ExportRow {
    fn from_assessment(assessment: &Assessment, rank: Option<usize>) -> Self {
        ExportRow {
            rank,
            category: assessment.category.clone(),
            hazard: assessment.hazard_name.clone(),
            consequence: assessment.consequence_label.clone(),
            exposure: assessment.exposure_label.clone(),
            probability: assessment.probability_label.clone(),
            score: assessment.score,
            risk_level: assessment.risk_level,
            fuzzy_score: assessment.fuzzy_score,
            vikor_score: assessment.vikor_score,
        }
    }
}

/// Rows grouped by category, highest score first within each category
///
/// `top_n` limits rows per category. `min_score` applies to the plain score.
pub fn grouped_rows(ledger: &Ledger, options: ReportOptions) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for group in ledger.grouped_by_category() {
        let mut entries: Vec<&Assessment> = group
            .assessments
            .into_iter()
            .filter(|a| passes_min_score(a, options.min_score))
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        let limit = options.top_n.unwrap_or(entries.len());
        rows.extend(
            entries
                .into_iter()
                .take(limit)
                .map(|a| ExportRow::from_assessment(a, None)),
        );
    }
    rows
}

/// Rows in VIKOR rank order
///
/// Ranks are computed before filtering, so filtered rows keep their rank.
/// `min_score` applies to the VIKOR score; entries without one fall back to
/// their plain score.
pub fn ranked_rows(ledger: &Ledger, options: ReportOptions) -> Vec<ExportRow> {
    let ranked = ledger
        .ranked_by_vikor_score()
        .into_iter()
        .filter(|r| {
            let key = r.assessment.vikor_score.unwrap_or(r.assessment.score);
            options.min_score.map_or(true, |min| key >= min)
        })
        .map(|r| ExportRow::from_assessment(r.assessment, Some(r.rank)));
    match options.top_n {
        Some(n) => ranked.take(n).collect(),
        None => ranked.collect(),
    }
}

fn passes_min_score(assessment: &Assessment, min_score: Option<f64>) -> bool {
    min_score.map_or(true, |min| assessment.score >= min)
}

/// Render the category-grouped report (DGMS)
pub fn render_grouped_text(rows: &[ExportRow]) -> String {
    let mut output = String::new();
    let mut start = 0;

    while start < rows.len() {
        let category = &rows[start].category;
        let end = rows[start..]
            .iter()
            .position(|r| &r.category != category)
            .map_or(rows.len(), |offset| start + offset);
        let group = &rows[start..end];

        if start > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{} ({} hazards)\n", category, group.len()));
        output.push_str(&format!(
            "{:<10} {:<8} {:<40} {:<30} {:<22} {}\n",
            "SCORE", "LEVEL", "HAZARD", "CONSEQUENCE", "EXPOSURE", "PROBABILITY"
        ));
        for row in group {
            output.push_str(&format!(
                "{:<10} {:<8} {:<40} {:<30} {:<22} {}\n",
                format!("{:.4}", row.score),
                row.risk_level.as_str(),
                truncate_or_pad(&row.hazard, 40),
                truncate_or_pad(&row.consequence, 30),
                truncate_or_pad(&row.exposure, 22),
                row.probability,
            ));
        }
        start = end;
    }

    output
}

/// Render the VIKOR ranking table (TRAM)
pub fn render_ranked_text(rows: &[ExportRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<30} {:<20} {:<8} {:<8} {}\n",
        "RANK", "HAZARD", "CATEGORY", "FUZZY", "VIKOR", "LEVEL"
    ));
    for row in rows {
        let rank = row.rank.map_or_else(|| "-".to_string(), |r| format!("#{}", r));
        output.push_str(&format!(
            "{:<6} {:<30} {:<20} {:<8} {:<8} {}\n",
            rank,
            truncate_or_pad(&row.hazard, 30),
            truncate_or_pad(&row.category, 20),
            format_optional(row.fuzzy_score),
            format_optional(row.vikor_score),
            row.risk_level.as_str(),
        ));
    }

    output
}

/// Render sampled membership curves, one column per level
pub fn render_membership_text(curve: &[MembershipPoint]) -> String {
    let mut output = String::new();
    let Some(first) = curve.first() else {
        return output;
    };

    output.push_str(&format!("{:<5}", "X"));
    for level in &first.levels {
        output.push_str(&format!(" {:>13}", level.label));
    }
    output.push('\n');

    for point in curve {
        output.push_str(&format!("{:<5.1}", point.x));
        for level in &point.levels {
            output.push_str(&format!(" {:>13.3}", level.value));
        }
        output.push('\n');
    }

    output
}

/// Render rows as JSON output
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
