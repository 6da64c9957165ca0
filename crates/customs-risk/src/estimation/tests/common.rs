use crate::estimation::domain::{
    Currency, EstimateRequest, ImportMode, Packaging, PersonalUse, PhoneDeclaration,
};
use crate::estimation::totals::DeclarationTotals;
use crate::ruleset::{load_rules, RuleConfiguration};

pub(super) fn rules() -> &'static RuleConfiguration {
    load_rules().expect("built-in rules load")
}

pub(super) fn mad(price: f64, packaging: Packaging, personal_use: PersonalUse) -> PhoneDeclaration {
    PhoneDeclaration::new(price, Currency::Mad, packaging, personal_use)
}

pub(super) fn eur(price: f64, packaging: Packaging, personal_use: PersonalUse) -> PhoneDeclaration {
    PhoneDeclaration::new(price, Currency::Eur, packaging, personal_use)
}

pub(super) fn traveller(phones: Vec<PhoneDeclaration>) -> EstimateRequest {
    EstimateRequest::new(ImportMode::Traveller, phones).expect("valid phone count")
}

pub(super) fn shipment(phones: Vec<PhoneDeclaration>) -> EstimateRequest {
    EstimateRequest::new(ImportMode::Shipment, phones).expect("valid phone count")
}

pub(super) fn totals_of(phones: &[PhoneDeclaration]) -> DeclarationTotals {
    DeclarationTotals::from_declarations(phones, rules().exchange_rate_eur_to_mad)
}

/// Three sealed phones at 3000 MAD, none for personal use.
pub(super) fn sealed_resale_batch() -> Vec<PhoneDeclaration> {
    vec![mad(3000.0, Packaging::Sealed, PersonalUse::No); 3]
}

/// Two opened phones at 2000 MAD, both for personal use.
pub(super) fn personal_pair() -> Vec<PhoneDeclaration> {
    vec![mad(2000.0, Packaging::Opened, PersonalUse::Yes); 2]
}
