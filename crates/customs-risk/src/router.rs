use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::estimation::{EstimateBreakdown, EstimationEngine};
use crate::intake::{EstimateSubmission, IntakeGuard};
use crate::ruleset::PublicRulesView;

/// Router builder exposing the estimate form endpoints.
pub fn estimate_router(engine: Arc<EstimationEngine>) -> Router {
    Router::new()
        .route("/api/v1/estimate", post(estimate_handler))
        .route("/api/v1/rules", get(rules_handler))
        .with_state(engine)
}

pub(crate) async fn estimate_handler(
    State(engine): State<Arc<EstimationEngine>>,
    Json(submission): Json<EstimateSubmission>,
) -> Result<Json<EstimateBreakdown>, AppError> {
    let request = IntakeGuard
        .request_from_submission(submission)
        .map_err(|rejection| {
            warn!(violations = rejection.violations.len(), "estimate submission rejected");
            rejection
        })?;

    let breakdown = engine.estimate(&request);
    debug!(
        phones = breakdown.totals.qty,
        score = breakdown.risk.score,
        level = breakdown.risk.level.label(),
        taxed = breakdown.tax.is_some(),
        "estimate computed"
    );

    Ok(Json(breakdown))
}

pub(crate) async fn rules_handler(
    State(engine): State<Arc<EstimationEngine>>,
) -> Json<PublicRulesView> {
    Json(engine.rules().public_view())
}
