//! Error types for the scoring engine

use crate::scale::ScaleFamily;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("unknown {family} label: {label:?}")]
    UnknownLabel { family: ScaleFamily, label: String },

    #[error("incomplete selection: missing {}", join_families(.missing))]
    IncompleteSelection { missing: Vec<ScaleFamily> },

    #[error("unknown hazard category: {0:?}")]
    UnknownCategory(String),

    #[error("category {category:?} is not part of the {method} method")]
    CategoryNotInMethod { category: String, method: String },

    #[error("hazard {hazard:?} is not listed under {category:?}")]
    UnknownHazard { category: String, hazard: String },

    #[error("hazard name must not be empty")]
    EmptyHazardName,

    #[error("weight for {category:?} must be within [{min}, {max}] (got {value})")]
    WeightOutOfRange {
        category: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn join_families(families: &[ScaleFamily]) -> String {
    families
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type RiskResult<T> = std::result::Result<T, RiskError>;
