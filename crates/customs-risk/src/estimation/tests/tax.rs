use super::common::*;
use crate::estimation::domain::{Packaging, PersonalUse};
use crate::estimation::rounding::round2;
use crate::estimation::{estimate, RiskLevel};

#[test]
fn traveller_above_low_gets_a_range() {
    let rules = rules();
    let breakdown = estimate(&traveller(sealed_resale_batch()), rules);

    let tax = breakdown.tax.expect("tax range for high risk traveller");
    assert_eq!(tax.declared_value, 9000.0);
    assert_eq!(tax.min_tax, 1800);
    assert_eq!(tax.max_tax, 3150);
    assert_eq!(tax.rate_low, rules.effective_rate_low);
    assert_eq!(tax.rate_high, rules.effective_rate_high);
}

#[test]
fn low_risk_traveller_gets_no_range() {
    let breakdown = estimate(&traveller(personal_pair()), rules());

    assert_eq!(breakdown.risk.level, RiskLevel::Low);
    assert!(breakdown.tax.is_none());
}

#[test]
fn shipment_never_gets_a_range() {
    let breakdown = estimate(&shipment(sealed_resale_batch()), rules());

    assert_eq!(breakdown.risk.level, RiskLevel::High);
    assert!(breakdown.tax.is_none());
}

#[test]
fn tax_endpoints_round_to_whole_dirhams() {
    let rules = rules();
    let request = traveller(vec![eur(1200.0, Packaging::Sealed, PersonalUse::Yes)]);

    let breakdown = estimate(&request, rules);

    let tax = breakdown.tax.expect("medium risk traveller gets a range");
    assert_eq!(tax.min_tax, 2592);
    assert_eq!(tax.max_tax, 4536);
    assert!(tax.min_tax <= tax.max_tax);
}

#[test]
fn declared_value_keeps_cents() {
    let rules = rules();
    let request = traveller(vec![
        mad(1234.565, Packaging::Sealed, PersonalUse::No),
        mad(1000.0, Packaging::Sealed, PersonalUse::No),
    ]);

    let breakdown = estimate(&request, rules);

    let tax = breakdown.tax.expect("two sealed phones exceed the LOW band");
    assert_eq!(tax.declared_value, breakdown.totals.total_value);
    assert_eq!(round2(tax.declared_value), tax.declared_value);
}
