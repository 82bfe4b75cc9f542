//! One assessment session: catalog overlay, category weights and ledger
//!
//! Global invariants enforced:
//! - A session owns all of its mutable state; nothing is shared between sessions
//! - A failed submission leaves the ledger unchanged

use crate::catalog::HazardCatalog;
use crate::category::{Category, Method};
use crate::error::{RiskError, RiskResult};
use crate::ledger::{Assessment, AssessmentDraft, Ledger};
use crate::risk::RiskLevel;
use crate::selection::Selection;
use crate::tram::CategoryWeights;
use crate::{dgms, tram};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of scoring a selection without recording it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: f64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vikor_score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Session {
    method: Method,
    catalog: HazardCatalog,
    weights: CategoryWeights,
    ledger: Ledger,
}

impl Session {
    pub fn new(method: Method) -> Self {
        Session {
            method,
            catalog: HazardCatalog::new(method),
            weights: CategoryWeights::default(),
            ledger: Ledger::new(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn catalog(&self) -> &HazardCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Resolve a category name for this session's method
    pub fn category(&self, name: &str) -> RiskResult<Category> {
        self.method
            .category(name)
            .ok_or_else(|| RiskError::UnknownCategory(name.to_string()))
    }

    pub fn add_custom_hazard(&mut self, category: Category, name: &str) -> RiskResult<()> {
        self.catalog.add_custom_hazard(category, name)
    }

    /// Move one TRAM category weight slider
    pub fn set_weight(&mut self, category: Category, value: f64) -> RiskResult<()> {
        self.weights.set(category, value)
    }

    pub fn replace_weights(&mut self, weights: CategoryWeights) {
        self.weights = weights;
    }

    /// Score a selection for a category without recording it
    pub fn preview(&self, category: Category, selection: &Selection) -> RiskResult<ScoreCard> {
        self.ensure_offered(category)?;
        match self.method {
            Method::Dgms => {
                let result = dgms::evaluate(selection)?;
                Ok(ScoreCard {
                    score: result.score,
                    risk_level: result.level,
                    category_weight: None,
                    fuzzy_score: None,
                    vikor_score: None,
                })
            }
            Method::Tram => {
                let result = tram::evaluate(selection, category, &self.weights)?;
                Ok(ScoreCard {
                    score: result.linguistic,
                    risk_level: result.level,
                    category_weight: Some(result.category_weight),
                    fuzzy_score: Some(result.linguistic),
                    vikor_score: Some(result.vikor),
                })
            }
        }
    }

    /// Score and record an assessment, stamped with the current time
    pub fn submit(
        &mut self,
        category: Category,
        hazard: &str,
        selection: &Selection,
    ) -> RiskResult<&Assessment> {
        self.submit_at(category, hazard, selection, Utc::now())
    }

    /// Score and record an assessment with an explicit timestamp
    ///
    /// The hazard name is trimmed, matching how custom hazards are stored.
    pub fn submit_at(
        &mut self,
        category: Category,
        hazard: &str,
        selection: &Selection,
        created_at: DateTime<Utc>,
    ) -> RiskResult<&Assessment> {
        let card = self.preview(category, selection)?;
        let hazard = hazard.trim();
        if !self.catalog.contains(category, hazard) {
            return Err(RiskError::UnknownHazard {
                category: category.as_str().to_string(),
                hazard: hazard.to_string(),
            });
        }

        let draft = AssessmentDraft {
            hazard_name: hazard.to_string(),
            category: category.as_str().to_string(),
            consequence_label: selection.consequence.clone(),
            exposure_label: selection.exposure.clone(),
            probability_label: selection.probability.clone(),
            score: card.score,
            risk_level: card.risk_level,
            fuzzy_score: card.fuzzy_score,
            vikor_score: card.vikor_score,
        };
        Ok(self.ledger.add(draft, created_at))
    }

    fn ensure_offered(&self, category: Category) -> RiskResult<()> {
        if self.method.offers(category) {
            Ok(())
        } else {
            Err(RiskError::CategoryNotInMethod {
                category: category.as_str().to_string(),
                method: self.method.as_str().to_string(),
            })
        }
    }
}
