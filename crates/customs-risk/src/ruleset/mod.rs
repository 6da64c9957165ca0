//! Versioned rule table backing the estimator.
//!
//! The built-in `rules.v1.json` table is embedded at compile time and parsed once per
//! process. Alternate tables can be loaded from disk with the same validation, so a new
//! policy revision only requires a new data file.

mod schema;
mod validation;

pub use schema::{
    LabelThresholds, PackagingScores, PersonalUseScores, PriceWeights, PublicRulesView,
    QuantityScores, ReasonMessages, ReasonThresholds, RiskRules, RuleConfiguration,
    RuleMessages, ScoreBucket, ScoreOverrides, VerdictMessages,
};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::info;

const BUILTIN_RULES_JSON: &str = include_str!("../../data/rules.v1.json");

static BUILTIN_RULES: OnceLock<RuleConfiguration> = OnceLock::new();

/// Failures raised while loading a rule table. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to parse rule table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rule table {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid rule table field `{field}`: {detail}")]
    Invalid { field: &'static str, detail: String },
}

impl RuleConfiguration {
    /// Parse and validate a rule table from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        let rules: RuleConfiguration = serde_json::from_str(raw)?;
        validation::validate(&rules)?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json(&raw)?;
        info!(version = %rules.version, path = %path.display(), "rule table loaded from file");
        Ok(rules)
    }
}

/// Return the process-wide built-in rule table, parsing it on first use.
pub fn load_rules() -> Result<&'static RuleConfiguration, RulesError> {
    if let Some(rules) = BUILTIN_RULES.get() {
        return Ok(rules);
    }

    let parsed = RuleConfiguration::from_json(BUILTIN_RULES_JSON)?;
    let rules = BUILTIN_RULES.get_or_init(|| parsed);
    info!(version = %rules.version, "built-in rule table loaded");
    Ok(rules)
}
