pub mod config;
pub mod error;
pub mod estimation;
pub mod intake;
pub mod router;
pub mod ruleset;
pub mod telemetry;

pub use estimation::{estimate, EstimateBreakdown, EstimateRequest, EstimationEngine};
pub use ruleset::{load_rules, RuleConfiguration, RulesError};
