//! Session-scoped assessment ledger
//!
//! Global invariants enforced:
//! - Ids start at 1 and strictly increase in submission order
//! - Entries are never reordered or removed; views borrow and sort copies
//! - Ranking ties keep submission order (stable sort)

use crate::risk::RiskLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A scored hazard waiting to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDraft {
    pub hazard_name: String,
    pub category: String,
    pub consequence_label: String,
    pub exposure_label: String,
    pub probability_label: String,
    pub score: f64,
    pub risk_level: RiskLevel,
    pub fuzzy_score: Option<f64>,
    pub vikor_score: Option<f64>,
}

/// A recorded assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Assessment {
    pub id: u64,
    pub hazard_name: String,
    pub category: String,
    pub consequence_label: String,
    pub exposure_label: String,
    pub probability_label: String,
    pub score: f64,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vikor_score: Option<f64>,
}

/// Assessments of one category, in submission order
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub assessments: Vec<&'a Assessment>,
}

/// An assessment with its 1-based VIKOR rank
#[derive(Debug, Clone, Serialize)]
pub struct RankedAssessment<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub assessment: &'a Assessment,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Assessment>,
    last_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a draft and return the stored entry
    pub fn add(&mut self, draft: AssessmentDraft, created_at: DateTime<Utc>) -> &Assessment {
        self.last_id += 1;
        let assessment = Assessment {
            id: self.last_id,
            hazard_name: draft.hazard_name,
            category: draft.category,
            consequence_label: draft.consequence_label,
            exposure_label: draft.exposure_label,
            probability_label: draft.probability_label,
            score: draft.score,
            risk_level: draft.risk_level,
            created_at,
            fuzzy_score: draft.fuzzy_score,
            vikor_score: draft.vikor_score,
        };
        debug!(
            id = assessment.id,
            hazard = %assessment.hazard_name,
            score = assessment.score,
            level = %assessment.risk_level,
            "assessment recorded"
        );
        self.entries.push(assessment);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in submission order
    pub fn iter(&self) -> impl Iterator<Item = &Assessment> {
        self.entries.iter()
    }

    /// Group entries by category, categories in order of first appearance
    pub fn grouped_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|g| g.category == entry.category) {
                Some(group) => group.assessments.push(entry),
                None => groups.push(CategoryGroup {
                    category: entry.category.clone(),
                    assessments: vec![entry],
                }),
            }
        }
        groups
    }

    /// Entries sorted by VIKOR score descending, with ranks
    ///
    /// Entries without a VIKOR score sort after all scored entries.
    pub fn ranked_by_vikor_score(&self) -> Vec<RankedAssessment<'_>> {
        let mut sorted: Vec<&Assessment> = self.entries.iter().collect();
        sorted.sort_by(|a, b| compare_vikor_desc(a.vikor_score, b.vikor_score));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, assessment)| RankedAssessment {
                rank: i + 1,
                assessment,
            })
            .collect()
    }
}

fn compare_vikor_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
