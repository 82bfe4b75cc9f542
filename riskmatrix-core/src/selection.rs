//! The three scale labels chosen for one hazard

use crate::error::{RiskError, RiskResult};
use crate::scale::ScaleFamily;
use serde::{Deserialize, Serialize};

/// A complete selection of consequence, exposure and probability labels
///
/// All three labels are required, so scoring functions never see a partial
/// selection. Use [`Selection::from_parts`] where inputs arrive optionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub consequence: String,
    pub exposure: String,
    pub probability: String,
}

impl Selection {
    pub fn new(
        consequence: impl Into<String>,
        exposure: impl Into<String>,
        probability: impl Into<String>,
    ) -> Self {
        Selection {
            consequence: consequence.into(),
            exposure: exposure.into(),
            probability: probability.into(),
        }
    }

    /// Build a selection from optional form inputs
    ///
    /// Blank values count as missing. Fails with `IncompleteSelection`
    /// listing every missing family.
    pub fn from_parts(
        consequence: Option<&str>,
        exposure: Option<&str>,
        probability: Option<&str>,
    ) -> RiskResult<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.trim().is_empty())
        }

        match (present(consequence), present(exposure), present(probability)) {
            (Some(c), Some(e), Some(p)) => Ok(Selection::new(c, e, p)),
            (c, e, p) => {
                let missing = [c.is_none(), e.is_none(), p.is_none()]
                    .into_iter()
                    .zip(ScaleFamily::ALL)
                    .filter(|(absent, _)| *absent)
                    .map(|(_, family)| family)
                    .collect();
                Err(RiskError::IncompleteSelection { missing })
            }
        }
    }

    pub fn label(&self, family: ScaleFamily) -> &str {
        match family {
            ScaleFamily::Consequence => &self.consequence,
            ScaleFamily::Exposure => &self.exposure,
            ScaleFamily::Probability => &self.probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_complete() {
        let sel = Selection::from_parts(Some("One death"), Some("Continuous"), Some("Quite possible"))
            .unwrap();
        assert_eq!(sel.label(ScaleFamily::Consequence), "One death");
        assert_eq!(sel.label(ScaleFamily::Exposure), "Continuous");
        assert_eq!(sel.label(ScaleFamily::Probability), "Quite possible");
    }

    #[test]
    fn test_from_parts_reports_all_missing_families() {
        let err = Selection::from_parts(None, Some("Continuous"), Some("  ")).unwrap_err();
        assert_eq!(
            err,
            RiskError::IncompleteSelection {
                missing: vec![ScaleFamily::Consequence, ScaleFamily::Probability],
            }
        );
        assert_eq!(
            err.to_string(),
            "incomplete selection: missing consequence, probability"
        );
    }
}
