//! TRAM fuzzy linguistic risk score
//!
//! Formulas:
//! - linguistic = (consequence + exposure + probability) / 3
//! - vikor = linguistic * category_weight
//!
//! The linguistic score is the mean of the crisp level values, not a
//! defuzzified aggregate; the classifier thresholds are tuned against it.
//!
//! Bands (on the linguistic score):
//! - Low:    score <= 2
//! - Medium: score <= 3.5
//! - High:   otherwise

use crate::category::{Category, Method};
use crate::error::{RiskError, RiskResult};
use crate::risk::RiskLevel;
use crate::scale::{FuzzyTriple, ScaleFamily, TRAM_SCALES};
use crate::selection::Selection;
use serde::Serialize;

const LOW_CEILING: f64 = 2.0;
const MEDIUM_CEILING: f64 = 3.5;

/// Slider bounds for category weights
pub const MIN_WEIGHT: f64 = 0.05;
pub const MAX_WEIGHT: f64 = 1.0;
pub const WEIGHT_STEP: f64 = 0.05;

/// Sampling grid for membership curves: x = i / 10 for i in 0..=50
const CURVE_SAMPLES: usize = 50;
const CURVE_DIVISOR: f64 = 10.0;

/// Scores for one TRAM selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TramScore {
    pub linguistic: f64,
    pub category_weight: f64,
    pub vikor: f64,
    pub level: RiskLevel,
}

/// Mean of the three level values
pub fn linguistic_score(consequence: &str, exposure: &str, probability: &str) -> RiskResult<f64> {
    let c = TRAM_SCALES.weight_of(ScaleFamily::Consequence, consequence)?;
    let e = TRAM_SCALES.weight_of(ScaleFamily::Exposure, exposure)?;
    let p = TRAM_SCALES.weight_of(ScaleFamily::Probability, probability)?;
    Ok((c + e + p) / 3.0)
}

pub fn vikor_score(linguistic_score: f64, category_weight: f64) -> f64 {
    linguistic_score * category_weight
}

pub fn classify(linguistic_score: f64) -> RiskLevel {
    if linguistic_score <= LOW_CEILING {
        RiskLevel::Low
    } else if linguistic_score <= MEDIUM_CEILING {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Score a complete selection under the current category weights
pub fn evaluate(
    selection: &Selection,
    category: Category,
    weights: &CategoryWeights,
) -> RiskResult<TramScore> {
    let category_weight = weights.weight(category)?;
    let linguistic = linguistic_score(
        &selection.consequence,
        &selection.exposure,
        &selection.probability,
    )?;
    Ok(TramScore {
        linguistic,
        category_weight,
        vikor: vikor_score(linguistic, category_weight),
        level: classify(linguistic),
    })
}

/// Triangular membership degree of `x` in `triple`
///
/// Zero outside `[a, c]` and one at `b`. A degenerate shoulder (`a == b` or
/// `b == c`) is a step, so the shoulder point keeps full membership. This
/// differs from an open-interval test (`x <= a || x >= c` gives zero), which
/// would drop `[0, 0, 2]` to zero at 0. Non-finite `x` has zero membership.
pub fn membership_value(triple: FuzzyTriple, x: f64) -> f64 {
    let FuzzyTriple { a, b, c } = triple;
    if !x.is_finite() || x < a || x > c {
        0.0
    } else if x == b {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Membership of one level at one sample point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelMembership {
    pub label: &'static str,
    pub value: f64,
}

/// One sample of a family's membership curves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipPoint {
    pub x: f64,
    pub levels: Vec<LevelMembership>,
}

/// Sample every level of a family over `[0, 5]` in steps of 0.1
pub fn membership_curve(family: ScaleFamily) -> Vec<MembershipPoint> {
    let levels = TRAM_SCALES.levels_of(family);
    (0..=CURVE_SAMPLES)
        .map(|i| {
            let x = i as f64 / CURVE_DIVISOR;
            let levels = levels
                .iter()
                .filter_map(|level| {
                    level.fuzzy.map(|triple| LevelMembership {
                        label: level.label,
                        value: membership_value(triple, x),
                    })
                })
                .collect();
            MembershipPoint { x, levels }
        })
        .collect()
}

/// AHP category weight sliders
///
/// Each weight is independent; the set is not normalised to sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWeights {
    values: [f64; 4],
}

impl Default for CategoryWeights {
    fn default() -> Self {
        // Ground Movement, Equipment Failure, Environmental, Human Factors
        CategoryWeights {
            values: [0.4, 0.25, 0.2, 0.15],
        }
    }
}

impl CategoryWeights {
    /// Build weights by snapping priorities onto the slider grid
    pub fn from_priorities(priorities: [f64; 4]) -> Self {
        CategoryWeights {
            values: priorities.map(snap_to_slider),
        }
    }

    fn index_of(category: Category) -> RiskResult<usize> {
        Method::Tram
            .categories()
            .iter()
            .position(|c| *c == category)
            .ok_or_else(|| RiskError::CategoryNotInMethod {
                category: category.as_str().to_string(),
                method: Method::Tram.as_str().to_string(),
            })
    }

    pub fn weight(&self, category: Category) -> RiskResult<f64> {
        Self::index_of(category).map(|i| self.values[i])
    }

    pub fn set(&mut self, category: Category, value: f64) -> RiskResult<()> {
        let index = Self::index_of(category)?;
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
            return Err(RiskError::WeightOutOfRange {
                category: category.as_str().to_string(),
                value,
                min: MIN_WEIGHT,
                max: MAX_WEIGHT,
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Weights in category display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Method::Tram
            .categories()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

fn snap_to_slider(value: f64) -> f64 {
    let snapped = (value / WEIGHT_STEP).round() * WEIGHT_STEP;
    snapped.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_linguistic_mean_and_vikor() {
        let s = linguistic_score("Medium", "Occasional", "Possible").unwrap();
        assert!((s - 3.0).abs() < EPS);
        assert!((vikor_score(s, 0.4) - 1.2).abs() < EPS);
        assert_eq!(classify(s), RiskLevel::Medium);
    }

    #[test]
    fn test_classify_thresholds_are_inclusive() {
        assert_eq!(classify(1.0), RiskLevel::Low);
        assert_eq!(classify(2.0), RiskLevel::Low);
        assert_eq!(classify(2.0 + 1e-9), RiskLevel::Medium);
        assert_eq!(classify(3.5), RiskLevel::Medium);
        assert_eq!(classify(3.6), RiskLevel::High);
    }

    #[test]
    fn test_classifier_differs_from_dgms() {
        // 1.0 is High under DGMS but Low under TRAM
        assert_eq!(crate::dgms::classify(1.0), RiskLevel::High);
        assert_eq!(classify(1.0), RiskLevel::Low);
    }

    #[test]
    fn test_unknown_tram_label() {
        let err = linguistic_score("Medium", "Continuous", "Possible").unwrap_err();
        assert!(matches!(err, RiskError::UnknownLabel { family: ScaleFamily::Exposure, .. }));
    }

    #[test]
    fn test_membership_triangle() {
        let t = FuzzyTriple::new(2.0, 3.0, 4.0);
        assert_eq!(membership_value(t, 2.0), 0.0);
        assert_eq!(membership_value(t, 3.0), 1.0);
        assert_eq!(membership_value(t, 4.0), 0.0);
        assert!((membership_value(t, 2.5) - 0.5).abs() < EPS);
        assert!((membership_value(t, 3.5) - 0.5).abs() < EPS);
        assert_eq!(membership_value(t, 1.0), 0.0);
        assert_eq!(membership_value(t, 4.5), 0.0);
    }

    #[test]
    fn test_membership_shoulders_are_steps() {
        let left = FuzzyTriple::new(0.0, 0.0, 2.0);
        assert_eq!(membership_value(left, 0.0), 1.0);
        assert!((membership_value(left, 1.0) - 0.5).abs() < EPS);
        assert_eq!(membership_value(left, 2.0), 0.0);

        let right = FuzzyTriple::new(4.0, 5.0, 5.0);
        assert_eq!(membership_value(right, 5.0), 1.0);
        assert!((membership_value(right, 4.5) - 0.5).abs() < EPS);
        assert_eq!(membership_value(right, 5.1), 0.0);
    }

    #[test]
    fn test_membership_of_non_finite_is_zero() {
        let t = FuzzyTriple::new(0.0, 0.0, 2.0);
        assert_eq!(membership_value(t, f64::NAN), 0.0);
        assert_eq!(membership_value(t, f64::INFINITY), 0.0);
        assert_eq!(membership_value(t, f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_membership_is_repeatable() {
        let t = FuzzyTriple::new(1.0, 2.0, 3.0);
        assert_eq!(
            membership_value(t, 1.3).to_bits(),
            membership_value(t, 1.3).to_bits()
        );
    }

    #[test]
    fn test_membership_curve_sampling() {
        let curve = membership_curve(ScaleFamily::Consequence);
        assert_eq!(curve.len(), 51);
        assert_eq!(curve[0].x, 0.0);
        assert_eq!(curve[50].x, 5.0);
        assert_eq!(curve[30].x, 3.0);
        assert!(curve.iter().all(|p| p.levels.len() == 5));

        let at_three = &curve[30];
        let medium = at_three.levels.iter().find(|l| l.label == "Medium").unwrap();
        assert_eq!(medium.value, 1.0);
    }

    #[test]
    fn test_default_weights_are_not_normalised_by_setting() {
        let mut weights = CategoryWeights::default();
        assert!((weights.total() - 1.0).abs() < EPS);
        weights.set(Category::HumanFactors, 0.9).unwrap();
        assert!((weights.total() - 1.75).abs() < EPS);
        assert_eq!(weights.weight(Category::GroundMovement).unwrap(), 0.4);
    }

    #[test]
    fn test_weight_range_is_enforced() {
        let mut weights = CategoryWeights::default();
        assert!(weights.set(Category::Environmental, 0.05).is_ok());
        assert!(weights.set(Category::Environmental, 1.0).is_ok());
        assert!(matches!(
            weights.set(Category::Environmental, 0.0),
            Err(RiskError::WeightOutOfRange { .. })
        ));
        assert!(weights.set(Category::Environmental, 1.01).is_err());
        assert!(weights.set(Category::Environmental, f64::NAN).is_err());
    }

    #[test]
    fn test_weight_for_dgms_only_category_fails() {
        let weights = CategoryWeights::default();
        assert!(matches!(
            weights.weight(Category::MineFire),
            Err(RiskError::CategoryNotInMethod { .. })
        ));
    }

    #[test]
    fn test_evaluate_uses_category_weight() {
        let sel = Selection::new("Very High", "Very Frequent", "Very Likely");
        let score = evaluate(&sel, Category::EquipmentFailure, &CategoryWeights::default()).unwrap();
        assert!((score.linguistic - 5.0).abs() < EPS);
        assert!((score.vikor - 1.25).abs() < EPS);
        assert_eq!(score.level, RiskLevel::High);
    }

    #[test]
    fn test_from_priorities_snaps_to_slider_grid() {
        let weights = CategoryWeights::from_priorities([0.46, 0.27, 0.011, 1.3]);
        let values: Vec<f64> = weights.iter().map(|(_, w)| w).collect();
        assert!((values[0] - 0.45).abs() < EPS);
        assert!((values[1] - 0.25).abs() < EPS);
        assert!((values[2] - 0.05).abs() < EPS);
        assert!((values[3] - 1.0).abs() < EPS);
    }
}
