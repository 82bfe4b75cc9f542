//! riskmatrix core library - DGMS and TRAM hazard risk scoring

// Global invariants enforced in this crate:
// - Scoring functions are pure: identical input yields bit-identical output
// - No global mutable state; sessions own their catalog additions, weights and ledger
// - Scale and hazard tables are immutable static data
// - Unknown labels and categories are errors, never silent defaults
// - Only the config and worksheet loaders touch the filesystem

pub mod ahp;
pub mod catalog;
pub mod category;
pub mod config;
pub mod dgms;
pub mod error;
pub mod hazards;
pub mod ledger;
pub mod report;
pub mod risk;
pub mod scale;
pub mod selection;
pub mod session;
pub mod tram;
pub mod worksheet;

pub use catalog::HazardCatalog;
pub use category::{Category, Method};
pub use error::{RiskError, RiskResult};
pub use ledger::{Assessment, Ledger, RankedAssessment};
pub use report::{render_json, ReportOptions};
pub use risk::RiskLevel;
pub use scale::{FuzzyTriple, ScaleFamily, ScaleLevel};
pub use selection::Selection;
pub use session::{ScoreCard, Session};
pub use tram::CategoryWeights;
pub use worksheet::{Worksheet, WorksheetOutcome};
