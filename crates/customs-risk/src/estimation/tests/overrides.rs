use super::common::*;
use crate::estimation::domain::{Packaging, PersonalUse};
use crate::estimation::policy::apply_overrides;
use crate::estimation::{estimate, RiskLevel};
use crate::ruleset::LabelThresholds;

#[test]
fn single_opened_personal_phone_is_capped() {
    let rules = rules();
    let request = traveller(vec![eur(1200.0, Packaging::Opened, PersonalUse::Yes)]);

    let breakdown = estimate(&request, rules);

    assert!(i32::from(breakdown.risk.score) <= rules.risk.overrides.single_opened_personal_max);
    assert_eq!(breakdown.risk.level, RiskLevel::Low);
    assert!(breakdown.tax.is_none());
}

#[test]
fn single_sealed_phone_is_not_capped() {
    let rules = rules();
    let request = traveller(vec![eur(1200.0, Packaging::Sealed, PersonalUse::Yes)]);

    let breakdown = estimate(&request, rules);

    // quantity 0 + price 28 + one sealed 12 + all yes 0
    assert_eq!(breakdown.risk.score, 40);
    assert_eq!(breakdown.risk.level, RiskLevel::Medium);
}

#[test]
fn three_or_more_phones_hit_the_floor() {
    let rules = rules();
    let request = traveller(vec![mad(500.0, Packaging::Opened, PersonalUse::Yes); 3]);

    let breakdown = estimate(&request, rules);

    assert_eq!(
        i32::from(breakdown.risk.score),
        rules.risk.overrides.min_for_three_plus
    );
    assert_eq!(breakdown.risk.level, RiskLevel::High);
}

#[test]
fn two_sealed_phones_force_the_floor_despite_personal_claims() {
    let rules = rules();
    let request = traveller(vec![mad(1000.0, Packaging::Sealed, PersonalUse::Yes); 2]);

    let breakdown = estimate(&request, rules);

    assert!(i32::from(breakdown.risk.score) >= rules.risk.overrides.two_sealed_min);
    assert_eq!(breakdown.risk.level, RiskLevel::Medium);
}

#[test]
fn dual_personal_pattern_caps_expensive_pairs() {
    let rules = rules();
    let request = traveller(vec![
        mad(15000.0, Packaging::Opened, PersonalUse::Yes),
        mad(15000.0, Packaging::Unknown, PersonalUse::Unsure),
    ]);

    let breakdown = estimate(&request, rules);

    // Raw score would be 59 without the cap.
    assert_eq!(
        i32::from(breakdown.risk.score),
        rules.risk.overrides.two_personal_low_max
    );
    assert_eq!(breakdown.risk.level, RiskLevel::Low);
}

#[test]
fn overrides_apply_in_fixed_order() {
    let overrides = rules().risk.overrides;
    let phones = personal_pair();
    let totals = totals_of(&phones);

    // The dual-personal ceiling runs last, so it wins over any earlier floor.
    let score = apply_overrides(95, &totals, &phones, &overrides);

    assert_eq!(i32::from(score), overrides.two_personal_low_max);
}

#[test]
fn final_score_is_clamped() {
    let overrides = rules().risk.overrides;
    let phones = vec![mad(1000.0, Packaging::Unknown, PersonalUse::Unsure); 2];
    let totals = totals_of(&phones);

    assert_eq!(apply_overrides(180, &totals, &phones, &overrides), 100);
    assert_eq!(apply_overrides(-40, &totals, &phones, &overrides), 0);
}

#[test]
fn negative_sub_scores_clamp_to_zero() {
    let mut rules = rules().clone();
    rules.risk.personal_use.all_yes = -50;
    let request = traveller(vec![mad(1000.0, Packaging::Opened, PersonalUse::Yes)]);

    let breakdown = estimate(&request, &rules);

    assert_eq!(breakdown.risk.score, 0);
    assert_eq!(breakdown.risk.level, RiskLevel::Low);
}

#[test]
fn levels_partition_the_score_range() {
    let thresholds = LabelThresholds {
        low_max: 33,
        medium_max: 66,
    };

    assert_eq!(RiskLevel::from_score(0, &thresholds), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(33, &thresholds), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(34, &thresholds), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(66, &thresholds), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(67, &thresholds), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(100, &thresholds), RiskLevel::High);
}

#[test]
fn verdict_follows_the_level() {
    let rules = rules();
    let breakdown = estimate(&traveller(sealed_resale_batch()), rules);

    assert_eq!(breakdown.risk.level, RiskLevel::High);
    assert_eq!(breakdown.risk.verdict, rules.messages.verdicts.high);
}
