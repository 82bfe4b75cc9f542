//! Linguistic scale tables
//!
//! Maps a human-readable label to its numeric weight. DGMS weights follow the
//! regulatory methodology and span 0.0001 to 10; TRAM weights are 1..=5 with a
//! triangular fuzzy number per level.
//!
//! Global invariants enforced:
//! - Tables are immutable `'static` data
//! - Label lookup is exact and never defaults to zero

use crate::error::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three scales every assessment selects from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFamily {
    Consequence,
    Exposure,
    Probability,
}

impl ScaleFamily {
    pub const ALL: [ScaleFamily; 3] = [
        ScaleFamily::Consequence,
        ScaleFamily::Exposure,
        ScaleFamily::Probability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleFamily::Consequence => "consequence",
            ScaleFamily::Exposure => "exposure",
            ScaleFamily::Probability => "probability",
        }
    }
}

impl fmt::Display for ScaleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triangular fuzzy number `(a, b, c)` with `a <= b <= c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyTriple {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl FuzzyTriple {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        FuzzyTriple { a, b, c }
    }
}

impl fmt::Display for FuzzyTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.a, self.b, self.c)
    }
}

/// One selectable level of a scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleLevel {
    pub label: &'static str,
    pub weight: f64,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyTriple>,
}

impl ScaleLevel {
    const fn crisp(label: &'static str, weight: f64, description: &'static str) -> Self {
        ScaleLevel {
            label,
            weight,
            description,
            fuzzy: None,
        }
    }

    const fn fuzzy(
        label: &'static str,
        weight: f64,
        description: &'static str,
        triple: FuzzyTriple,
    ) -> Self {
        ScaleLevel {
            label,
            weight,
            description,
            fuzzy: Some(triple),
        }
    }
}

/// The three scales of one method
#[derive(Debug)]
pub struct ScaleTable {
    pub consequence: &'static [ScaleLevel],
    pub exposure: &'static [ScaleLevel],
    pub probability: &'static [ScaleLevel],
}

impl ScaleTable {
    /// Levels of a family, in ascending weight order
    pub fn levels_of(&self, family: ScaleFamily) -> &'static [ScaleLevel] {
        match family {
            ScaleFamily::Consequence => self.consequence,
            ScaleFamily::Exposure => self.exposure,
            ScaleFamily::Probability => self.probability,
        }
    }

    /// Look up a level by its exact label
    pub fn level_of(&self, family: ScaleFamily, label: &str) -> RiskResult<&'static ScaleLevel> {
        self.levels_of(family)
            .iter()
            .find(|level| level.label == label)
            .ok_or_else(|| RiskError::UnknownLabel {
                family,
                label: label.to_string(),
            })
    }

    pub fn weight_of(&self, family: ScaleFamily, label: &str) -> RiskResult<f64> {
        self.level_of(family, label).map(|level| level.weight)
    }
}

pub static DGMS_SCALES: ScaleTable = ScaleTable {
    consequence: &[
        ScaleLevel::crisp("Small injury", 0.0001, "Minor injury requiring first aid"),
        ScaleLevel::crisp("One lost time injury", 0.001, "Single injury causing work absence"),
        ScaleLevel::crisp("Many lost time injuries", 0.01, "Multiple injuries with work impact"),
        ScaleLevel::crisp("One permanent disability", 0.1, "Single permanent impairment"),
        ScaleLevel::crisp("Significant chance of fatality", 0.3, "High probability of death"),
        ScaleLevel::crisp("One death", 1.0, "Single fatality"),
        ScaleLevel::crisp("Several dead", 5.0, "Multiple fatalities"),
    ],
    exposure: &[
        ScaleLevel::crisp("Once in 100 years", 0.02, "Extremely rare occurrence"),
        ScaleLevel::crisp("Once in 10 years", 0.5, "Very infrequent event"),
        ScaleLevel::crisp("Once in 5 years", 1.5, "Infrequent occurrence"),
        ScaleLevel::crisp("Occasionally (yearly)", 2.0, "Annual occurrence"),
        ScaleLevel::crisp("Unusual (monthly)", 2.5, "Monthly frequency"),
        ScaleLevel::crisp("Seldom (weekly)", 3.0, "Weekly occurrence"),
        ScaleLevel::crisp("Frequent (daily)", 5.0, "Daily exposure"),
        ScaleLevel::crisp("Continuous", 10.0, "Constant exposure"),
    ],
    probability: &[
        ScaleLevel::crisp("Virtually impossible", 0.1, "Almost never happens"),
        ScaleLevel::crisp("Practically impossible", 0.5, "Highly unlikely"),
        ScaleLevel::crisp("Conceivable but unlikely", 1.0, "Possible but improbable"),
        ScaleLevel::crisp("Only remotely possible", 2.0, "Remote possibility"),
        ScaleLevel::crisp("Unusual but possible", 3.0, "Uncommon but feasible"),
        ScaleLevel::crisp("Quite possible", 7.0, "Reasonably likely"),
        ScaleLevel::crisp("May well be expected", 10.0, "Very likely to occur"),
    ],
};

const VERY_LOW: FuzzyTriple = FuzzyTriple::new(0.0, 0.0, 2.0);
const LOW: FuzzyTriple = FuzzyTriple::new(1.0, 2.0, 3.0);
const MEDIUM: FuzzyTriple = FuzzyTriple::new(2.0, 3.0, 4.0);
const HIGH: FuzzyTriple = FuzzyTriple::new(3.0, 4.0, 5.0);
const VERY_HIGH: FuzzyTriple = FuzzyTriple::new(4.0, 5.0, 5.0);

pub static TRAM_SCALES: ScaleTable = ScaleTable {
    consequence: &[
        ScaleLevel::fuzzy("Very Low", 1.0, "Negligible harm", VERY_LOW),
        ScaleLevel::fuzzy("Low", 2.0, "First aid case", LOW),
        ScaleLevel::fuzzy("Medium", 3.0, "Lost time injury", MEDIUM),
        ScaleLevel::fuzzy("High", 4.0, "Permanent disability", HIGH),
        ScaleLevel::fuzzy("Very High", 5.0, "Fatality", VERY_HIGH),
    ],
    exposure: &[
        ScaleLevel::fuzzy("Very Rare", 1.0, "Hardly ever exposed", VERY_LOW),
        ScaleLevel::fuzzy("Rare", 2.0, "Exposed a few times a year", LOW),
        ScaleLevel::fuzzy("Occasional", 3.0, "Exposed monthly", MEDIUM),
        ScaleLevel::fuzzy("Frequent", 4.0, "Exposed weekly", HIGH),
        ScaleLevel::fuzzy("Very Frequent", 5.0, "Exposed every shift", VERY_HIGH),
    ],
    probability: &[
        ScaleLevel::fuzzy("Remote", 1.0, "Not expected to occur", VERY_LOW),
        ScaleLevel::fuzzy("Unlikely", 2.0, "Could occur but improbable", LOW),
        ScaleLevel::fuzzy("Possible", 3.0, "Might occur", MEDIUM),
        ScaleLevel::fuzzy("Likely", 4.0, "Will probably occur", HIGH),
        ScaleLevel::fuzzy("Very Likely", 5.0, "Expected to occur", VERY_HIGH),
    ],
};
