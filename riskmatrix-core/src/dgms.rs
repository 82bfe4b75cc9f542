//! DGMS linear risk score
//!
//! Formula:
//! risk = consequence * exposure * probability
//!
//! Bands:
//! - Low:    score < 0.01
//! - Medium: 0.01 <= score < 1
//! - High:   score >= 1

use crate::error::RiskResult;
use crate::risk::RiskLevel;
use crate::scale::{ScaleFamily, DGMS_SCALES};
use crate::selection::Selection;
use serde::Serialize;

const MEDIUM_THRESHOLD: f64 = 0.01;
const HIGH_THRESHOLD: f64 = 1.0;

/// Score and level for one DGMS selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DgmsScore {
    pub score: f64,
    pub level: RiskLevel,
}

/// Product of the three looked-up weights
pub fn score(consequence: &str, exposure: &str, probability: &str) -> RiskResult<f64> {
    let c = DGMS_SCALES.weight_of(ScaleFamily::Consequence, consequence)?;
    let e = DGMS_SCALES.weight_of(ScaleFamily::Exposure, exposure)?;
    let p = DGMS_SCALES.weight_of(ScaleFamily::Probability, probability)?;
    Ok(c * e * p)
}

pub fn classify(score: f64) -> RiskLevel {
    if score < MEDIUM_THRESHOLD {
        RiskLevel::Low
    } else if score < HIGH_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Score a complete selection and classify it
pub fn evaluate(selection: &Selection) -> RiskResult<DgmsScore> {
    let score = score(
        &selection.consequence,
        &selection.exposure,
        &selection.probability,
    )?;
    Ok(DgmsScore {
        score,
        level: classify(score),
    })
}
