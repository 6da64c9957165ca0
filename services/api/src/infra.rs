use customs_risk::config::RulesSettings;
use customs_risk::estimation::{Currency, ImportMode, Packaging, PersonalUse};
use customs_risk::intake::{PhoneSubmission, RawPrice};
use customs_risk::{EstimationEngine, RulesError};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build an engine from an explicit rule file, falling back to the configured settings.
pub(crate) fn engine_from(
    override_path: Option<PathBuf>,
    settings: RulesSettings,
) -> Result<EstimationEngine, RulesError> {
    let settings = match override_path {
        Some(path) => RulesSettings { path: Some(path) },
        None => settings,
    };
    settings.resolve().map(EstimationEngine::new)
}

fn parse_token<T>(raw: &str, label: &str) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unknown {label} '{raw}'"))
}

pub(crate) fn parse_import_mode(raw: &str) -> Result<ImportMode, String> {
    parse_token(&raw.to_ascii_lowercase(), "import mode")
}

/// Parse `price:currency:packaging:personal_use`, e.g. `1200:EUR:sealed:no`.
///
/// Only the shape is checked here; price validation happens in the intake guard so the
/// command line and the HTTP form reject the same inputs.
pub(crate) fn parse_phone_spec(raw: &str) -> Result<PhoneSubmission, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [price, currency, packaging, personal_use] = parts.as_slice() else {
        return Err(format!(
            "expected price:currency:packaging:personal_use, found '{raw}'"
        ));
    };

    let currency: Currency = parse_token(&currency.to_ascii_uppercase(), "currency")?;
    let packaging: Packaging = parse_token(&packaging.to_ascii_lowercase(), "packaging")?;
    let personal_use: PersonalUse =
        parse_token(&personal_use.to_ascii_lowercase(), "personal use answer")?;

    Ok(PhoneSubmission {
        price: Some(RawPrice::Text(price.to_string())),
        currency: Some(currency.into()),
        packaging: Some(packaging.into()),
        personal_use: Some(personal_use.into()),
    })
}
