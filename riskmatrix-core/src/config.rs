//! Configuration file support for riskmatrix
//!
//! Loads session defaults from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.riskmatrixrc.json` in the working directory
//! 3. `riskmatrix.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::category::Method;
use crate::error::RiskResult;
use crate::session::Session;
use crate::tram::{CategoryWeights, MAX_WEIGHT, MIN_WEIGHT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const RC_FILE: &str = ".riskmatrixrc.json";
const CONFIG_FILE: &str = "riskmatrix.config.json";

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// riskmatrix configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskMatrixConfig {
    /// Assessment method (default: dgms)
    #[serde(default)]
    pub method: Option<Method>,

    /// TRAM category weight overrides, keyed by category name
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Maximum number of report rows (per category for grouped reports)
    #[serde(default)]
    pub top: Option<usize>,

    /// Minimum score to report (default: report all)
    #[serde(default)]
    pub min_score: Option<f64>,

    /// Output format (default: text)
    #[serde(default)]
    pub format: Option<ReportFormat>,

    /// Hazards added to every session whose method offers the category
    #[serde(default)]
    pub custom_hazards: Vec<CustomHazardConfig>,
}

/// A custom hazard declared in config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomHazardConfig {
    pub category: String,
    pub name: String,
}

/// Resolved configuration with defaults filled in
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub method: Method,
    pub weights: CategoryWeights,
    pub top_n: Option<usize>,
    pub min_score: Option<f64>,
    pub format: ReportFormat,
    pub custom_hazards: Vec<CustomHazardConfig>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl RiskMatrixConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.weights {
            if Method::Tram.category(name).is_none() {
                anyhow::bail!("weights.{:?} is not a TRAM category", name);
            }
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(value) {
                anyhow::bail!(
                    "weights.{:?} must be within [{}, {}] (got {})",
                    name,
                    MIN_WEIGHT,
                    MAX_WEIGHT,
                    value
                );
            }
        }

        validate_report_filters(self.top, self.min_score)?;

        for (i, hazard) in self.custom_hazards.iter().enumerate() {
            let known = Method::Dgms.category(&hazard.category).is_some()
                || Method::Tram.category(&hazard.category).is_some();
            if !known {
                anyhow::bail!(
                    "custom_hazards[{}].category {:?} is not a known category",
                    i,
                    hazard.category
                );
            }
            if hazard.name.trim().is_empty() {
                anyhow::bail!("custom_hazards[{}].name must not be empty", i);
            }
        }

        Ok(())
    }

    /// Resolve config into a form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let mut weights = CategoryWeights::default();
        for (name, value) in &self.weights {
            let category = Method::Tram
                .category(name)
                .with_context(|| format!("unknown TRAM category: {}", name))?;
            weights.set(category, *value)?;
        }

        Ok(ResolvedConfig {
            method: self.method.unwrap_or(Method::Dgms),
            weights,
            top_n: self.top,
            min_score: self.min_score,
            format: self.format.unwrap_or_default(),
            custom_hazards: self.custom_hazards.clone(),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        RiskMatrixConfig::default().resolve()
    }

    /// Start a session for `method` with configured weights and hazards
    ///
    /// Custom hazards for categories the method does not offer are skipped.
    pub fn new_session(&self, method: Method) -> RiskResult<Session> {
        let mut session = Session::new(method);
        session.replace_weights(self.weights.clone());
        for hazard in &self.custom_hazards {
            match method.category(&hazard.category) {
                Some(category) => session.add_custom_hazard(category, &hazard.name)?,
                None => debug!(
                    category = %hazard.category,
                    method = %method,
                    "custom hazard skipped for method"
                ),
            }
        }
        Ok(session)
    }
}

/// Check `top` and `min_score`, whether they come from a file or the command line
pub fn validate_report_filters(top: Option<usize>, min_score: Option<f64>) -> Result<()> {
    if let Some(min) = min_score {
        if !min.is_finite() || min < 0.0 {
            anyhow::bail!("min_score must be a non-negative number (got {})", min);
        }
    }

    if top == Some(0) {
        anyhow::bail!("top must be at least 1");
    }

    Ok(())
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(RiskMatrixConfig, PathBuf)>> {
    for file in [RC_FILE, CONFIG_FILE] {
        let path = dir.join(file);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from a specific JSON file
pub fn load_config_file(path: &Path) -> Result<RiskMatrixConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: RiskMatrixConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load and resolve config: explicit path, then discovery, then defaults
pub fn load_and_resolve(dir: &Path, explicit_path: Option<&Path>) -> Result<ResolvedConfig> {
    let found = match explicit_path {
        Some(path) => Some((load_config_file(path)?, path.to_path_buf())),
        None => discover_config(dir)?,
    };

    match found {
        Some((config, path)) => {
            let mut resolved = config
                .resolve()
                .with_context(|| format!("invalid config: {}", path.display()))?;
            resolved.config_path = Some(path);
            Ok(resolved)
        }
        None => ResolvedConfig::defaults(),
    }
}
