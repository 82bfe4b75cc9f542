//! AHP pairwise comparison of TRAM categories
//!
//! Derives suggested category weights from a pairwise comparison matrix using
//! the row geometric mean method, and checks judgement consistency with
//! Saaty's consistency ratio. The derived vector sums to one; the slider
//! weights in `tram::CategoryWeights` do not have to.

use crate::category::{Category, Method};
use crate::tram::CategoryWeights;
use serde::Serialize;

const N: usize = 4;

/// Saaty's random consistency index for a 4x4 matrix
const RANDOM_INDEX: f64 = 0.90;

/// Ratios at or below this are conventionally acceptable
pub const ACCEPTABLE_CONSISTENCY: f64 = 0.1;

/// Pairwise comparison matrix, rows and columns in TRAM category order
///
/// Entry `[i][j]` is how much more important category `i` is than `j`.
pub const TRAM_PAIRWISE: [[f64; N]; N] = [
    [1.0, 3.0, 2.0, 4.0],
    [1.0 / 3.0, 1.0, 2.0, 3.0],
    [1.0 / 2.0, 1.0 / 2.0, 1.0, 2.0],
    [1.0 / 4.0, 1.0 / 3.0, 1.0 / 2.0, 1.0],
];

/// Result of analysing a pairwise matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpAnalysis {
    pub priorities: Vec<(String, f64)>,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: f64,
}

impl AhpAnalysis {
    pub fn is_consistent(&self) -> bool {
        self.consistency_ratio <= ACCEPTABLE_CONSISTENCY
    }
}

/// Normalised priority vector (row geometric means)
pub fn priority_vector(matrix: &[[f64; N]; N]) -> [f64; N] {
    let means = matrix.map(|row| row.iter().product::<f64>().powf(1.0 / N as f64));
    let total: f64 = means.iter().sum();
    means.map(|m| m / total)
}

/// Principal eigenvalue estimate: mean of (A w)_i / w_i
pub fn lambda_max(matrix: &[[f64; N]; N], priorities: &[f64; N]) -> f64 {
    let ratios: f64 = matrix
        .iter()
        .zip(priorities.iter())
        .map(|(row, w_i)| {
            let weighted: f64 = row.iter().zip(priorities.iter()).map(|(a, w)| a * w).sum();
            weighted / w_i
        })
        .sum();
    ratios / N as f64
}

/// Full analysis of a matrix over the TRAM categories
pub fn analyze(matrix: &[[f64; N]; N]) -> AhpAnalysis {
    let priorities = priority_vector(matrix);
    let lambda = lambda_max(matrix, &priorities);
    let ci = (lambda - N as f64) / (N as f64 - 1.0);

    AhpAnalysis {
        priorities: tram_categories()
            .iter()
            .zip(priorities.iter())
            .map(|(c, w)| (c.as_str().to_string(), *w))
            .collect(),
        lambda_max: lambda,
        consistency_index: ci,
        consistency_ratio: ci / RANDOM_INDEX,
    }
}

/// Slider weights suggested by the built-in matrix
pub fn suggested_weights() -> CategoryWeights {
    CategoryWeights::from_priorities(priority_vector(&TRAM_PAIRWISE))
}

fn tram_categories() -> &'static [Category] {
    Method::Tram.categories()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_matrix_is_reciprocal() {
        for i in 0..N {
            assert_eq!(TRAM_PAIRWISE[i][i], 1.0);
            for j in 0..N {
                assert!((TRAM_PAIRWISE[i][j] * TRAM_PAIRWISE[j][i] - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_priority_vector_sums_to_one_and_is_ordered() {
        let w = priority_vector(&TRAM_PAIRWISE);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!(w[0] > w[1] && w[1] > w[2] && w[2] > w[3]);
        assert!((w[0] - 0.4714).abs() < 1e-3);
    }

    #[test]
    fn test_identity_matrix_is_perfectly_consistent() {
        let ones = [[1.0; N]; N];
        let analysis = analyze(&ones);
        assert!((analysis.lambda_max - 4.0).abs() < EPS);
        assert!(analysis.consistency_ratio.abs() < EPS);
        for (_, w) in &analysis.priorities {
            assert!((w - 0.25).abs() < EPS);
        }
    }

    #[test]
    fn test_builtin_matrix_is_acceptably_consistent() {
        let analysis = analyze(&TRAM_PAIRWISE);
        assert!(analysis.lambda_max > 4.0);
        assert!(analysis.consistency_ratio > 0.0);
        assert!(analysis.is_consistent());
        assert_eq!(analysis.priorities[0].0, "Ground Movement");
    }

    #[test]
    fn test_suggested_weights_land_on_slider_grid() {
        let weights = suggested_weights();
        let values: Vec<f64> = weights.iter().map(|(_, w)| w).collect();
        let expected = [0.45, 0.25, 0.2, 0.1];
        for (v, e) in values.iter().zip(expected.iter()) {
            assert!((v - e).abs() < EPS, "{} != {}", v, e);
        }
    }
}
