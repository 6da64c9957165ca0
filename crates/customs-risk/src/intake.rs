//! Form intake: turns raw submissions into validated [`EstimateRequest`] values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::estimation::{
    Currency, EstimateRequest, ImportMode, Packaging, PersonalUse, PhoneDeclaration,
    MAX_DECLARATIONS, MAX_DECLARED_PRICE, MIN_DECLARATIONS,
};

/// Price as typed into the form: a JSON number, the raw field text, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawPrice {
    fn parse(&self) -> Option<f64> {
        match self {
            RawPrice::Number(value) => Some(*value),
            RawPrice::Text(raw) => raw.trim().replace(',', ".").parse::<f64>().ok(),
            RawPrice::Other(_) => None,
        }
    }
}

/// Selection field of the form: a recognised option or whatever value was sent.
///
/// Unrecognised values are kept so the guard can report them against their field instead
/// of failing the whole body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormChoice<T> {
    Known(T),
    Other(Value),
}

impl<T> From<T> for FormChoice<T> {
    fn from(value: T) -> Self {
        FormChoice::Known(value)
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One phone as submitted by the form, before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneSubmission {
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub currency: Option<FormChoice<Currency>>,
    #[serde(default)]
    pub packaging: Option<FormChoice<Packaging>>,
    #[serde(default)]
    pub personal_use: Option<FormChoice<PersonalUse>>,
}

/// Raw estimate form payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSubmission {
    #[serde(default)]
    pub import_mode: Option<FormChoice<ImportMode>>,
    #[serde(default)]
    pub phones: Vec<PhoneSubmission>,
}

/// Form field addressed by a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    ImportMode,
    Phones,
    Price { index: usize },
    Currency { index: usize },
    Packaging { index: usize },
    PersonalUse { index: usize },
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeField::ImportMode => write!(f, "importMode"),
            IntakeField::Phones => write!(f, "phones"),
            IntakeField::Price { index } => write!(f, "phones[{index}].price"),
            IntakeField::Currency { index } => write!(f, "phones[{index}].currency"),
            IntakeField::Packaging { index } => write!(f, "phones[{index}].packaging"),
            IntakeField::PersonalUse { index } => write!(f, "phones[{index}].personalUse"),
        }
    }
}

/// Single field-level problem found in a submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("select an import mode")]
    MissingImportMode,
    #[error("unknown import mode '{value}'")]
    InvalidImportMode { value: String },
    #[error("add at least one phone")]
    TooFewPhones,
    #[error("at most 10 phones can be declared, found {found}")]
    TooManyPhones { found: usize },
    #[error("phone {index} has no price")]
    MissingPrice { index: usize },
    #[error("phone {index} price is not a number")]
    UnparsablePrice { index: usize },
    #[error("phone {index} price must be positive, found {value}")]
    NonPositivePrice { index: usize, value: f64 },
    #[error("phone {index} price exceeds the accepted maximum of {max}")]
    PriceTooHigh { index: usize, max: f64 },
    #[error("phone {index} has no currency")]
    MissingCurrency { index: usize },
    #[error("phone {index} currency '{value}' is not one of EUR, MAD")]
    InvalidCurrency { index: usize, value: String },
    #[error("phone {index} has no packaging condition")]
    MissingPackaging { index: usize },
    #[error("phone {index} packaging '{value}' is not one of opened, sealed, unknown")]
    InvalidPackaging { index: usize, value: String },
    #[error("phone {index} has no personal-use answer")]
    MissingPersonalUse { index: usize },
    #[error("phone {index} personal-use answer '{value}' is not one of yes, no, unsure")]
    InvalidPersonalUse { index: usize, value: String },
}

impl IntakeViolation {
    pub fn field(&self) -> IntakeField {
        match self {
            IntakeViolation::MissingImportMode | IntakeViolation::InvalidImportMode { .. } => {
                IntakeField::ImportMode
            }
            IntakeViolation::TooFewPhones | IntakeViolation::TooManyPhones { .. } => {
                IntakeField::Phones
            }
            IntakeViolation::MissingPrice { index }
            | IntakeViolation::UnparsablePrice { index }
            | IntakeViolation::NonPositivePrice { index, .. }
            | IntakeViolation::PriceTooHigh { index, .. } => IntakeField::Price { index: *index },
            IntakeViolation::MissingCurrency { index }
            | IntakeViolation::InvalidCurrency { index, .. } => {
                IntakeField::Currency { index: *index }
            }
            IntakeViolation::MissingPackaging { index }
            | IntakeViolation::InvalidPackaging { index, .. } => {
                IntakeField::Packaging { index: *index }
            }
            IntakeViolation::MissingPersonalUse { index }
            | IntakeViolation::InvalidPersonalUse { index, .. } => {
                IntakeField::PersonalUse { index: *index }
            }
        }
    }
}

/// Every violation found in one submission, in form order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("submission rejected: {}", summarize(.violations))]
pub struct IntakeRejection {
    pub violations: Vec<IntakeViolation>,
}

fn summarize(violations: &[IntakeViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Guard responsible for producing `EstimateRequest` instances from form input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Validate a raw submission, collecting every violation rather than stopping at
    /// the first one.
    pub fn request_from_submission(
        &self,
        submission: EstimateSubmission,
    ) -> Result<EstimateRequest, IntakeRejection> {
        let mut violations = Vec::new();

        let import_mode = match submission.import_mode {
            None => {
                violations.push(IntakeViolation::MissingImportMode);
                None
            }
            Some(choice) => known(choice, &mut violations, |value| {
                IntakeViolation::InvalidImportMode { value }
            }),
        };

        let count = submission.phones.len();
        if count < MIN_DECLARATIONS {
            violations.push(IntakeViolation::TooFewPhones);
        } else if count > MAX_DECLARATIONS {
            violations.push(IntakeViolation::TooManyPhones { found: count });
        }

        let mut phones = Vec::with_capacity(count);
        for (index, phone) in submission.phones.iter().enumerate() {
            if let Some(declaration) = validate_phone(index, phone, &mut violations) {
                phones.push(declaration);
            }
        }

        let import_mode = match import_mode {
            Some(mode) if violations.is_empty() => mode,
            _ => return Err(IntakeRejection { violations }),
        };

        EstimateRequest::new(import_mode, phones).map_err(|err| IntakeRejection {
            violations: vec![IntakeViolation::TooManyPhones { found: err.found }],
        })
    }
}

fn validate_phone(
    index: usize,
    phone: &PhoneSubmission,
    violations: &mut Vec<IntakeViolation>,
) -> Option<PhoneDeclaration> {
    let price = match &phone.price {
        None => {
            violations.push(IntakeViolation::MissingPrice { index });
            None
        }
        Some(raw) => match raw.parse() {
            None => {
                violations.push(IntakeViolation::UnparsablePrice { index });
                None
            }
            Some(value) if !value.is_finite() => {
                violations.push(IntakeViolation::UnparsablePrice { index });
                None
            }
            Some(value) if value <= 0.0 => {
                violations.push(IntakeViolation::NonPositivePrice { index, value });
                None
            }
            Some(value) if value > MAX_DECLARED_PRICE => {
                violations.push(IntakeViolation::PriceTooHigh {
                    index,
                    max: MAX_DECLARED_PRICE,
                });
                None
            }
            Some(value) => Some(value),
        },
    };

    let currency = match phone.currency.clone() {
        None => {
            violations.push(IntakeViolation::MissingCurrency { index });
            None
        }
        Some(choice) => known(choice, violations, |value| {
            IntakeViolation::InvalidCurrency { index, value }
        }),
    };
    let packaging = match phone.packaging.clone() {
        None => {
            violations.push(IntakeViolation::MissingPackaging { index });
            None
        }
        Some(choice) => known(choice, violations, |value| {
            IntakeViolation::InvalidPackaging { index, value }
        }),
    };
    let personal_use = match phone.personal_use.clone() {
        None => {
            violations.push(IntakeViolation::MissingPersonalUse { index });
            None
        }
        Some(choice) => known(choice, violations, |value| {
            IntakeViolation::InvalidPersonalUse { index, value }
        }),
    };

    Some(PhoneDeclaration::new(
        price?,
        currency?,
        packaging?,
        personal_use?,
    ))
}

fn known<T>(
    choice: FormChoice<T>,
    violations: &mut Vec<IntakeViolation>,
    unknown: impl FnOnce(String) -> IntakeViolation,
) -> Option<T> {
    match choice {
        FormChoice::Known(value) => Some(value),
        FormChoice::Other(raw) => {
            violations.push(unknown(describe(&raw)));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(price: RawPrice) -> PhoneSubmission {
        PhoneSubmission {
            price: Some(price),
            currency: Some(Currency::Eur.into()),
            packaging: Some(Packaging::Opened.into()),
            personal_use: Some(PersonalUse::Yes.into()),
        }
    }

    fn submission(phones: Vec<PhoneSubmission>) -> EstimateSubmission {
        EstimateSubmission {
            import_mode: Some(ImportMode::Traveller.into()),
            phones,
        }
    }

    fn rejection(submission: EstimateSubmission) -> Vec<IntakeViolation> {
        IntakeGuard
            .request_from_submission(submission)
            .expect_err("submission must be rejected")
            .violations
    }

    #[test]
    fn accepts_a_complete_submission() {
        let request = IntakeGuard
            .request_from_submission(submission(vec![phone(RawPrice::Number(1200.0))]))
            .expect("valid submission");

        assert_eq!(request.import_mode(), ImportMode::Traveller);
        assert_eq!(request.phones().len(), 1);
        assert_eq!(request.phones()[0].price, 1200.0);
    }

    #[test]
    fn coerces_text_prices() {
        let request = IntakeGuard
            .request_from_submission(submission(vec![phone(RawPrice::Text(
                " 1199,90 ".to_string(),
            ))]))
            .expect("text price coerced");

        assert_eq!(request.phones()[0].price, 1199.9);
    }

    #[test]
    fn rejects_empty_phone_list() {
        assert_eq!(
            rejection(submission(Vec::new())),
            vec![IntakeViolation::TooFewPhones]
        );
    }

    #[test]
    fn rejects_more_than_ten_phones() {
        let phones = vec![phone(RawPrice::Number(500.0)); 11];
        assert_eq!(
            rejection(submission(phones)),
            vec![IntakeViolation::TooManyPhones { found: 11 }]
        );
    }

    #[test]
    fn rejects_non_positive_and_unparsable_prices() {
        let violations = rejection(submission(vec![
            phone(RawPrice::Number(0.0)),
            phone(RawPrice::Text("douze".to_string())),
            phone(RawPrice::Number(-10.0)),
        ]));

        assert_eq!(
            violations,
            vec![
                IntakeViolation::NonPositivePrice {
                    index: 0,
                    value: 0.0
                },
                IntakeViolation::UnparsablePrice { index: 1 },
                IntakeViolation::NonPositivePrice {
                    index: 2,
                    value: -10.0
                },
            ]
        );
    }

    #[test]
    fn collects_every_missing_field() {
        let violations = rejection(EstimateSubmission {
            import_mode: None,
            phones: vec![PhoneSubmission::default()],
        });

        let fields: Vec<String> = violations.iter().map(|v| v.field().to_string()).collect();
        assert_eq!(
            fields,
            vec![
                "importMode",
                "phones[0].price",
                "phones[0].currency",
                "phones[0].packaging",
                "phones[0].personalUse",
            ]
        );
    }

    #[test]
    fn deserializes_legacy_import_mode_names() {
        let raw = r#"{
            "importMode": "envoi",
            "phones": [
                { "price": "3000", "currency": "MAD", "packaging": "sealed", "personalUse": "no" }
            ]
        }"#;
        let submission: EstimateSubmission = serde_json::from_str(raw).expect("payload parses");

        let request = IntakeGuard
            .request_from_submission(submission)
            .expect("valid submission");

        assert_eq!(request.import_mode(), ImportMode::Shipment);
        assert_eq!(request.phones()[0].packaging, Packaging::Sealed);
    }

    #[test]
    fn rejection_message_lists_violations() {
        let err = IntakeGuard
            .request_from_submission(submission(Vec::new()))
            .expect_err("empty submission rejected");
        assert!(err.to_string().contains("add at least one phone"));
    }

    #[test]
    fn reports_unknown_choices_against_their_fields() {
        let raw = r#"{
            "importMode": "courier",
            "phones": [
                { "price": 900, "currency": "USD", "packaging": "boxed", "personalUse": 3 }
            ]
        }"#;
        let submission: EstimateSubmission = serde_json::from_str(raw).expect("payload parses");

        let violations = rejection(submission);

        assert_eq!(
            violations,
            vec![
                IntakeViolation::InvalidImportMode {
                    value: "courier".to_string()
                },
                IntakeViolation::InvalidCurrency {
                    index: 0,
                    value: "USD".to_string()
                },
                IntakeViolation::InvalidPackaging {
                    index: 0,
                    value: "boxed".to_string()
                },
                IntakeViolation::InvalidPersonalUse {
                    index: 0,
                    value: "3".to_string()
                },
            ]
        );
        assert_eq!(violations[1].field().to_string(), "phones[0].currency");
    }

    #[test]
    fn rejects_non_numeric_price_values() {
        let raw = r#"{ "importMode": "traveller", "phones": [
            { "price": true, "currency": "EUR", "packaging": "opened", "personalUse": "yes" }
        ] }"#;
        let submission: EstimateSubmission = serde_json::from_str(raw).expect("payload parses");

        assert_eq!(
            rejection(submission),
            vec![IntakeViolation::UnparsablePrice { index: 0 }]
        );
    }

    #[test]
    fn rejects_prices_above_the_ceiling() {
        let violations = rejection(submission(vec![
            phone(RawPrice::Number(1e308)),
            phone(RawPrice::Number(MAX_DECLARED_PRICE)),
            phone(RawPrice::Text("2000000".to_string())),
        ]));

        assert_eq!(
            violations,
            vec![
                IntakeViolation::PriceTooHigh {
                    index: 0,
                    max: MAX_DECLARED_PRICE
                },
                IntakeViolation::PriceTooHigh {
                    index: 2,
                    max: MAX_DECLARED_PRICE
                },
            ]
        );
    }

    #[test]
    fn accepted_maximum_prices_keep_totals_finite() {
        let request = IntakeGuard
            .request_from_submission(submission(vec![
                phone(RawPrice::Number(MAX_DECLARED_PRICE));
                MAX_DECLARATIONS
            ]))
            .expect("ceiling prices accepted");

        let rules = crate::ruleset::load_rules().expect("built-in rules load");
        let breakdown = crate::estimation::estimate(&request, rules);
        assert!(breakdown.totals.total_value.is_finite());
        let tax = breakdown.tax.expect("expensive batch is taxed");
        assert!(tax.max_tax < u64::MAX);
    }
}
