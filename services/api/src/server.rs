use crate::cli::ServeArgs;
use crate::infra::{engine_from, AppState};
use crate::routes::with_estimate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use customs_risk::config::AppConfig;
use customs_risk::error::AppError;
use customs_risk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    // An unreadable or invalid rule table stops startup.
    let engine = Arc::new(engine_from(args.rules.take(), config.rules.clone())?);
    let rules_version = engine.rules().version.clone();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_estimate_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, rules = %rules_version, "customs risk estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
