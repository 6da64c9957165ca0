use super::schema::{RuleConfiguration, ScoreBucket};
use super::RulesError;

const SCORE_CEILING: i32 = 100;
const WEIGHT_SUM_CEILING: f64 = 1.0;
const WEIGHT_TOLERANCE: f64 = 1e-9;

fn invalid(field: &'static str, detail: impl Into<String>) -> RulesError {
    RulesError::Invalid {
        field,
        detail: detail.into(),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), RulesError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, found {value}")))
    }
}

fn require_rate(field: &'static str, value: f64) -> Result<(), RulesError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must lie strictly between 0 and 1, found {value}")))
    }
}

fn require_score(field: &'static str, value: i32) -> Result<(), RulesError> {
    if (0..=SCORE_CEILING).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must lie within 0..=100, found {value}")))
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), RulesError> {
    if value.trim().is_empty() {
        Err(invalid(field, "must not be empty"))
    } else {
        Ok(())
    }
}

/// Bucket lists must be non-empty, strictly ascending by bound and non-decreasing by score.
fn require_buckets(field: &'static str, buckets: &[ScoreBucket]) -> Result<(), RulesError> {
    if buckets.is_empty() {
        return Err(invalid(field, "must contain at least one bucket"));
    }

    for bucket in buckets {
        if !bucket.upper_bound.is_finite() {
            return Err(invalid(field, "upper bounds must be finite"));
        }
        require_score(field, bucket.score)?;
    }

    for pair in buckets.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.upper_bound <= lower.upper_bound {
            return Err(invalid(
                field,
                format!(
                    "upper bounds must be strictly ascending ({} then {})",
                    lower.upper_bound, upper.upper_bound
                ),
            ));
        }
        if upper.score < lower.score {
            return Err(invalid(
                field,
                format!(
                    "scores must not decrease ({} then {})",
                    lower.score, upper.score
                ),
            ));
        }
    }

    Ok(())
}

pub(super) fn validate(rules: &RuleConfiguration) -> Result<(), RulesError> {
    require_text("version", &rules.version)?;
    require_positive("exchangeRateEurToMad", rules.exchange_rate_eur_to_mad)?;
    require_rate("effectiveRateLow", rules.effective_rate_low)?;
    require_rate("effectiveRateHigh", rules.effective_rate_high)?;
    if rules.effective_rate_low > rules.effective_rate_high {
        return Err(invalid(
            "effectiveRateLow",
            format!(
                "must not exceed effectiveRateHigh ({} > {})",
                rules.effective_rate_low, rules.effective_rate_high
            ),
        ));
    }

    let risk = &rules.risk;
    require_buckets("risk.maxPriceBuckets", &risk.max_price_buckets)?;
    require_buckets("risk.totalValueBuckets", &risk.total_value_buckets)?;

    for (field, score) in [
        ("risk.quantity.one", risk.quantity.one),
        ("risk.quantity.two", risk.quantity.two),
        ("risk.quantity.threePlus", risk.quantity.three_plus),
        ("risk.packaging.default", risk.packaging.default),
        ("risk.packaging.noSealedOpened", risk.packaging.no_sealed_opened),
        ("risk.packaging.oneSealed", risk.packaging.one_sealed),
        ("risk.packaging.twoPlusSealed", risk.packaging.two_plus_sealed),
        ("risk.packaging.allOpened", risk.packaging.all_opened),
        ("risk.personalUse.allUnsure", risk.personal_use.all_unsure),
        ("risk.personalUse.anyNo", risk.personal_use.any_no),
        ("risk.personalUse.allYes", risk.personal_use.all_yes),
        ("risk.personalUse.someYesRestUnsure", risk.personal_use.some_yes_rest_unsure),
    ] {
        require_score(field, score)?;
    }

    for (field, weight) in [
        ("risk.weights.maxPrice", risk.weights.max_price),
        ("risk.weights.totalValue", risk.weights.total_value),
    ] {
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid(field, format!("must be a non-negative number, found {weight}")));
        }
    }
    let weight_sum = risk.weights.max_price + risk.weights.total_value;
    if weight_sum > WEIGHT_SUM_CEILING + WEIGHT_TOLERANCE {
        return Err(invalid(
            "risk.weights",
            format!("weights must sum to at most 1, found {weight_sum}"),
        ));
    }

    require_score("risk.overrides.minForThreePlus", risk.overrides.min_for_three_plus)?;
    require_score(
        "risk.overrides.singleOpenedPersonalMax",
        risk.overrides.single_opened_personal_max,
    )?;
    require_score("risk.overrides.twoSealedMin", risk.overrides.two_sealed_min)?;
    require_score("risk.overrides.twoPersonalLowMax", risk.overrides.two_personal_low_max)?;

    let thresholds = risk.label_thresholds;
    if thresholds.medium_max > 100 {
        return Err(invalid(
            "risk.labelThresholds.mediumMax",
            format!("must not exceed 100, found {}", thresholds.medium_max),
        ));
    }
    if thresholds.low_max > thresholds.medium_max {
        return Err(invalid(
            "risk.labelThresholds.lowMax",
            format!(
                "must not exceed mediumMax ({} > {})",
                thresholds.low_max, thresholds.medium_max
            ),
        ));
    }

    require_positive("risk.reasonThresholds.maxPrice", risk.reason_thresholds.max_price)?;
    require_positive(
        "risk.reasonThresholds.totalValue",
        risk.reason_thresholds.total_value,
    )?;
    if risk.reason_limit == 0 {
        return Err(invalid("risk.reasonLimit", "must allow at least one reason"));
    }

    let verdicts = &rules.messages.verdicts;
    require_text("messages.verdicts.low", &verdicts.low)?;
    require_text("messages.verdicts.medium", &verdicts.medium)?;
    require_text("messages.verdicts.high", &verdicts.high)?;

    let reasons = &rules.messages.reasons;
    for (field, text) in [
        ("messages.reasons.dualPersonal", &reasons.dual_personal),
        ("messages.reasons.threePlus", &reasons.three_plus),
        ("messages.reasons.twoPhones", &reasons.two_phones),
        ("messages.reasons.twoPlusSealed", &reasons.two_plus_sealed),
        ("messages.reasons.oneSealed", &reasons.one_sealed),
        ("messages.reasons.personalNo", &reasons.personal_no),
        ("messages.reasons.highMaxPrice", &reasons.high_max_price),
        ("messages.reasons.highTotalValue", &reasons.high_total_value),
    ] {
        require_text(field, text)?;
    }

    Ok(())
}
