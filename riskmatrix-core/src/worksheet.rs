//! Batch worksheets
//!
//! A worksheet is a JSON document holding what a user would enter into the
//! assessment form over one session: weight adjustments, custom hazards and
//! a list of hazard entries. Entries that fail validation are reported and
//! skipped; the rest are recorded in order.

use crate::category::Method;
use crate::config::CustomHazardConfig;
use crate::error::{RiskError, RiskResult};
use crate::selection::Selection;
use crate::session::Session;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Worksheet {
    #[serde(default)]
    pub method: Option<Method>,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub custom_hazards: Vec<CustomHazardConfig>,
    #[serde(default)]
    pub entries: Vec<WorksheetEntry>,
}

/// One form submission; any of the three labels may be missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorksheetEntry {
    pub category: String,
    pub hazard: String,
    #[serde(default)]
    pub consequence: Option<String>,
    #[serde(default)]
    pub exposure: Option<String>,
    #[serde(default)]
    pub probability: Option<String>,
}

/// An entry that was not recorded
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Zero-based position in `entries`
    pub index: usize,
    pub hazard: String,
    pub error: RiskError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetOutcome {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

impl Worksheet {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse worksheet")
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read worksheet: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Apply weights and custom hazards, then submit every entry
    ///
    /// Weights and custom hazards are checked as a whole first. On any error
    /// the session is left untouched and no entry is submitted.
    pub fn apply(&self, session: &mut Session) -> RiskResult<WorksheetOutcome> {
        let mut weights = session.weights().clone();
        for (name, value) in &self.weights {
            let category = Method::Tram
                .category(name)
                .ok_or_else(|| RiskError::UnknownCategory(name.clone()))?;
            weights.set(category, *value)?;
        }
        let mut hazards = Vec::with_capacity(self.custom_hazards.len());
        for hazard in &self.custom_hazards {
            let category = session.category(&hazard.category)?;
            if hazard.name.trim().is_empty() {
                return Err(RiskError::EmptyHazardName);
            }
            hazards.push((category, hazard.name.as_str()));
        }

        session.replace_weights(weights);
        for (category, name) in hazards {
            session.add_custom_hazard(category, name)?;
        }

        let mut outcome = WorksheetOutcome::default();
        for (index, entry) in self.entries.iter().enumerate() {
            match submit_entry(session, entry) {
                Ok(()) => outcome.accepted += 1,
                Err(error) => {
                    warn!(index, hazard = %entry.hazard, %error, "worksheet entry rejected");
                    outcome.rejected.push(Rejection {
                        index,
                        hazard: entry.hazard.clone(),
                        error,
                    });
                }
            }
        }
        Ok(outcome)
    }
}

fn submit_entry(session: &mut Session, entry: &WorksheetEntry) -> RiskResult<()> {
    let selection = Selection::from_parts(
        entry.consequence.as_deref(),
        entry.exposure.as_deref(),
        entry.probability.as_deref(),
    )?;
    let category = session.category(&entry.category)?;
    session.submit(category, &entry.hazard, &selection)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::scale::ScaleFamily;

    const TRAM_SHEET: &str = r#"{
        "method": "tram",
        "weights": { "Environmental": 0.5 },
        "custom_hazards": [ { "category": "Environmental", "name": "Heat stress" } ],
        "entries": [
            { "category": "Environmental", "hazard": "Heat stress",
              "consequence": "High", "exposure": "Frequent", "probability": "Likely" },
            { "category": "Environmental", "hazard": "Gas emission",
              "consequence": "Medium", "exposure": "Occasional" },
            { "category": "Ground Movement", "hazard": "Roof fall",
              "consequence": "Very High", "exposure": "Rare", "probability": "Possible" }
        ]
    }"#;

    #[test]
    fn test_apply_tram_sheet() {
        let sheet = Worksheet::from_json(TRAM_SHEET).unwrap();
        assert_eq!(sheet.method, Some(Method::Tram));

        let mut session = Session::new(Method::Tram);
        let outcome = sheet.apply(&mut session).unwrap();

        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].index, 1);
        assert_eq!(
            outcome.rejected[0].error,
            RiskError::IncompleteSelection {
                missing: vec![ScaleFamily::Probability]
            }
        );

        assert_eq!(session.weights().weight(Category::Environmental).unwrap(), 0.5);
        let first = session.ledger().iter().next().unwrap();
        assert_eq!(first.hazard_name, "Heat stress");
        assert!((first.vikor_score.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_entry_is_rejected_not_fatal() {
        let sheet = Worksheet::from_json(
            r#"{ "entries": [
                { "category": "Roof Bolting", "hazard": "Loose bolt",
                  "consequence": "One death", "exposure": "Continuous", "probability": "Quite possible" },
                { "category": "Explosives", "hazard": "Defective detonators",
                  "consequence": "One death", "exposure": "Continuous", "probability": "Quite possible" }
            ] }"#,
        )
        .unwrap();

        let mut session = Session::new(Method::Dgms);
        let outcome = sheet.apply(&mut session).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(
            outcome.rejected[0].error,
            RiskError::UnknownCategory("Roof Bolting".to_string())
        );
    }

    #[test]
    fn test_bad_weight_aborts_before_entries() {
        let sheet = Worksheet::from_json(
            r#"{ "weights": { "Human Factors": 2.0 },
                 "entries": [ { "category": "Human Factors", "hazard": "Operator error",
                   "consequence": "Low", "exposure": "Rare", "probability": "Remote" } ] }"#,
        )
        .unwrap();

        let mut session = Session::new(Method::Tram);
        assert!(matches!(
            sheet.apply(&mut session),
            Err(RiskError::WeightOutOfRange { .. })
        ));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_failed_setup_leaves_session_untouched() {
        let sheet = Worksheet::from_json(
            r#"{ "weights": { "Environmental": 0.9, "Human Factors": 2.0 } }"#,
        )
        .unwrap();
        let mut session = Session::new(Method::Tram);
        assert!(sheet.apply(&mut session).is_err());
        assert_eq!(session.weights().weight(Category::Environmental).unwrap(), 0.2);

        let sheet = Worksheet::from_json(
            r#"{ "weights": { "Environmental": 0.9 },
                 "custom_hazards": [
                   { "category": "Environmental", "name": "Heat stress" },
                   { "category": "Environmental", "name": "   " } ] }"#,
        )
        .unwrap();
        assert_eq!(sheet.apply(&mut session), Err(RiskError::EmptyHazardName));
        assert_eq!(session.weights().weight(Category::Environmental).unwrap(), 0.2);
        assert_eq!(session.catalog().custom_count(), 0);
    }

    #[test]
    fn test_padded_names_in_sheet_are_assessed() {
        let sheet = Worksheet::from_json(
            r#"{ "custom_hazards": [ { "category": "Human Factors", "name": " Fatigue " } ],
                 "entries": [ { "category": "Human Factors", "hazard": " Fatigue ",
                   "consequence": "Low", "exposure": "Rare", "probability": "Remote" } ] }"#,
        )
        .unwrap();
        let mut session = Session::new(Method::Tram);
        let outcome = sheet.apply(&mut session).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Worksheet::from_json(r#"{ "entries": [], "persist": true }"#).is_err());
    }
}
