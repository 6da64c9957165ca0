use serde::{Deserialize, Serialize};

use super::domain::{Packaging, PersonalUse, PhoneDeclaration};
use super::rounding::round2;

/// Aggregated facts about every declared phone, with values expressed in MAD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationTotals {
    pub qty: usize,
    pub total_value: f64,
    pub max_price: f64,
    pub sealed_count: usize,
    pub opened_count: usize,
    pub personal_yes_count: usize,
    pub personal_no_count: usize,
    pub personal_unsure_count: usize,
}

impl DeclarationTotals {
    pub fn from_declarations(phones: &[PhoneDeclaration], exchange_rate_eur_to_mad: f64) -> Self {
        let mut totals = Self {
            qty: phones.len(),
            total_value: 0.0,
            max_price: 0.0,
            sealed_count: 0,
            opened_count: 0,
            personal_yes_count: 0,
            personal_no_count: 0,
            personal_unsure_count: 0,
        };

        let mut sum = 0.0;
        for phone in phones {
            let price = phone.price_in_mad(exchange_rate_eur_to_mad);
            sum += price;
            totals.max_price = totals.max_price.max(price);

            match phone.packaging {
                Packaging::Sealed => totals.sealed_count += 1,
                Packaging::Opened => totals.opened_count += 1,
                Packaging::Unknown => {}
            }

            match phone.personal_use {
                PersonalUse::Yes => totals.personal_yes_count += 1,
                PersonalUse::No => totals.personal_no_count += 1,
                PersonalUse::Unsure => totals.personal_unsure_count += 1,
            }
        }
        totals.total_value = round2(sum);

        totals
    }

    /// Two opened phones, none sealed, none declared non-personal and at least one
    /// declared personal: the usual private plus work phone pair.
    pub fn is_two_phones_personal(&self) -> bool {
        self.qty == 2
            && self.personal_no_count == 0
            && self.personal_yes_count >= 1
            && self.sealed_count == 0
            && self.opened_count >= 1
    }
}
