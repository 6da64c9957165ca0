//! Rule-based customs risk and tax range estimation.
//!
//! Every function here is pure: the same request and rule table always produce the same
//! breakdown, and the only shared input is the read-only [`RuleConfiguration`].

pub mod domain;
mod policy;
pub mod rounding;
mod scoring;
pub mod totals;

#[cfg(test)]
mod tests;

pub use domain::{
    Currency, DeclarationCountError, EstimateRequest, ImportMode, Packaging, PersonalUse,
    PhoneDeclaration, MAX_DECLARATIONS, MAX_DECLARED_PRICE, MIN_DECLARATIONS,
};
pub use policy::{RiskLevel, TaxEstimate};
pub use totals::DeclarationTotals;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ruleset::RuleConfiguration;

/// Score, band and explanation for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub verdict: String,
    pub reasons: Vec<String>,
}

/// Full estimation output handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateBreakdown {
    pub totals: DeclarationTotals,
    pub risk: RiskAssessment,
    pub tax: Option<TaxEstimate>,
}

/// Estimate the customs risk and, when applicable, the tax range for a request.
pub fn estimate(request: &EstimateRequest, rules: &RuleConfiguration) -> EstimateBreakdown {
    let totals =
        DeclarationTotals::from_declarations(request.phones(), rules.exchange_rate_eur_to_mad);

    let sub_scores = scoring::score_totals(&totals, &rules.risk);
    let score = policy::apply_overrides(
        sub_scores.raw_total(),
        &totals,
        request.phones(),
        &rules.risk.overrides,
    );

    let level = RiskLevel::from_score(score, &rules.risk.label_thresholds);
    let risk = RiskAssessment {
        score,
        level,
        verdict: level.verdict(rules).to_string(),
        reasons: policy::collect_reasons(&totals, rules),
    };

    let tax = policy::tax_range(request.import_mode(), score, &totals, rules);

    EstimateBreakdown { totals, risk, tax }
}

/// Stateless estimator bound to a shared rule table.
#[derive(Debug, Clone)]
pub struct EstimationEngine {
    rules: Arc<RuleConfiguration>,
}

impl EstimationEngine {
    pub fn new(rules: Arc<RuleConfiguration>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleConfiguration {
        &self.rules
    }

    pub fn estimate(&self, request: &EstimateRequest) -> EstimateBreakdown {
        estimate(request, &self.rules)
    }
}
