//! Risk level classification shared by both methods
//!
//! Global invariants enforced:
//! - Classification is a pure function of the score
//! - DGMS and TRAM thresholds are kept separate (see `dgms::classify`, `tram::classify`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
