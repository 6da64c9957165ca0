use serde::{Deserialize, Serialize};

use crate::ruleset::{LabelThresholds, RuleConfiguration, ScoreOverrides};

use super::domain::{ImportMode, Packaging, PersonalUse, PhoneDeclaration};
use super::rounding::{round2, round_half_up};
use super::totals::DeclarationTotals;

const MIN_SCORE: i32 = 0;
const MAX_SCORE: i32 = 100;

/// Discrete risk band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8, thresholds: &LabelThresholds) -> Self {
        if score <= thresholds.low_max {
            RiskLevel::Low
        } else if score <= thresholds.medium_max {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn verdict<'r>(&self, rules: &'r RuleConfiguration) -> &'r str {
        let verdicts = &rules.messages.verdicts;
        match self {
            RiskLevel::Low => &verdicts.low,
            RiskLevel::Medium => &verdicts.medium,
            RiskLevel::High => &verdicts.high,
        }
    }
}

/// Apply the floor/ceiling overrides in their fixed order, then clamp to 0..=100.
pub(crate) fn apply_overrides(
    raw_score: i32,
    totals: &DeclarationTotals,
    phones: &[PhoneDeclaration],
    overrides: &ScoreOverrides,
) -> u8 {
    let mut score = raw_score;

    if totals.qty >= 3 {
        score = score.max(overrides.min_for_three_plus);
    }

    if let [only] = phones {
        if only.packaging == Packaging::Opened && only.personal_use == PersonalUse::Yes {
            score = score.min(overrides.single_opened_personal_max);
        }
    }

    if totals.qty == 2 && totals.sealed_count == 2 {
        score = score.max(overrides.two_sealed_min);
    }

    if totals.is_two_phones_personal() {
        score = score.min(overrides.two_personal_low_max);
    }

    score.clamp(MIN_SCORE, MAX_SCORE) as u8
}

/// Build the short explanation list. Each category contributes at most its first
/// matching sentence.
pub(crate) fn collect_reasons(
    totals: &DeclarationTotals,
    rules: &RuleConfiguration,
) -> Vec<String> {
    let messages = &rules.messages.reasons;
    let thresholds = &rules.risk.reason_thresholds;
    let dual_personal = totals.is_two_phones_personal();
    let mut reasons = Vec::new();

    if dual_personal {
        reasons.push(messages.dual_personal.clone());
    } else if totals.qty >= 3 {
        reasons.push(messages.three_plus.clone());
    } else if totals.qty == 2 {
        reasons.push(messages.two_phones.clone());
    }

    if !dual_personal {
        if totals.sealed_count >= 2 {
            reasons.push(messages.two_plus_sealed.clone());
        } else if totals.sealed_count == 1 {
            reasons.push(messages.one_sealed.clone());
        }

        if totals.personal_no_count >= 1 {
            reasons.push(messages.personal_no.clone());
        }

        if totals.max_price > thresholds.max_price {
            reasons.push(messages.high_max_price.clone());
        }

        if totals.total_value > thresholds.total_value {
            reasons.push(messages.high_total_value.clone());
        }
    }

    reasons.truncate(rules.risk.reason_limit);
    reasons
}

/// Indicative tax band for a declared value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimate {
    pub declared_value: f64,
    pub min_tax: u64,
    pub max_tax: u64,
    pub rate_low: f64,
    pub rate_high: f64,
}

/// Only travellers outside the LOW band receive a tax range.
pub(crate) fn tax_range(
    import_mode: ImportMode,
    score: u8,
    totals: &DeclarationTotals,
    rules: &RuleConfiguration,
) -> Option<TaxEstimate> {
    if import_mode != ImportMode::Traveller || score <= rules.risk.label_thresholds.low_max {
        return None;
    }

    Some(TaxEstimate {
        declared_value: round2(totals.total_value),
        min_tax: round_half_up(totals.total_value * rules.effective_rate_low) as u64,
        max_tax: round_half_up(totals.total_value * rules.effective_rate_high) as u64,
        rate_low: rules.effective_rate_low,
        rate_high: rules.effective_rate_high,
    })
}
