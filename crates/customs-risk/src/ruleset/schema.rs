use serde::{Deserialize, Serialize};

/// Versioned rule table holding every tunable constant used by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleConfiguration {
    pub version: String,
    pub exchange_rate_eur_to_mad: f64,
    pub effective_rate_low: f64,
    pub effective_rate_high: f64,
    pub risk: RiskRules,
    pub messages: RuleMessages,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskRules {
    pub quantity: QuantityScores,
    pub max_price_buckets: Vec<ScoreBucket>,
    pub total_value_buckets: Vec<ScoreBucket>,
    pub packaging: PackagingScores,
    pub personal_use: PersonalUseScores,
    pub weights: PriceWeights,
    pub overrides: ScoreOverrides,
    pub label_thresholds: LabelThresholds,
    pub reason_thresholds: ReasonThresholds,
    pub reason_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuantityScores {
    pub one: i32,
    pub two: i32,
    pub three_plus: i32,
}

/// One step of a bucket list: values strictly below `upper_bound` score `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoreBucket {
    pub upper_bound: f64,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PackagingScores {
    pub default: i32,
    pub no_sealed_opened: i32,
    pub one_sealed: i32,
    pub two_plus_sealed: i32,
    pub all_opened: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalUseScores {
    pub all_unsure: i32,
    pub any_no: i32,
    pub all_yes: i32,
    pub some_yes_rest_unsure: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceWeights {
    pub max_price: f64,
    pub total_value: f64,
}

/// Floors and ceilings applied to the combined score for specific declared patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoreOverrides {
    pub min_for_three_plus: i32,
    pub single_opened_personal_max: i32,
    pub two_sealed_min: i32,
    pub two_personal_low_max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabelThresholds {
    pub low_max: u8,
    pub medium_max: u8,
}

/// Values above which a price-related reason is surfaced, in MAD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReasonThresholds {
    pub max_price: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleMessages {
    pub verdicts: VerdictMessages,
    pub reasons: ReasonMessages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerdictMessages {
    pub low: String,
    pub medium: String,
    pub high: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReasonMessages {
    pub dual_personal: String,
    pub three_plus: String,
    pub two_phones: String,
    pub two_plus_sealed: String,
    pub one_sealed: String,
    pub personal_no: String,
    pub high_max_price: String,
    pub high_total_value: String,
}

/// Subset of the rule table that the form displays in its assumptions panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRulesView {
    pub version: String,
    pub exchange_rate_eur_to_mad: f64,
    pub effective_rate_low: f64,
    pub effective_rate_high: f64,
    pub notes: Vec<String>,
}

impl RuleConfiguration {
    pub fn public_view(&self) -> PublicRulesView {
        PublicRulesView {
            version: self.version.clone(),
            exchange_rate_eur_to_mad: self.exchange_rate_eur_to_mad,
            effective_rate_low: self.effective_rate_low,
            effective_rate_high: self.effective_rate_high,
            notes: self.notes.clone(),
        }
    }
}
