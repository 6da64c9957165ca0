use crate::config::ConfigError;
use crate::intake::IntakeRejection;
use crate::ruleset::RulesError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Rules(RulesError),
    Intake(IntakeRejection),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Rules(err) => write!(f, "rule table error: {}", err),
            AppError::Intake(err) => write!(f, "invalid estimate request: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Rules(err) => Some(err),
            AppError::Intake(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Intake(rejection) = &self {
            let violations: Vec<_> = rejection
                .violations
                .iter()
                .map(|violation| {
                    json!({
                        "field": violation.field().to_string(),
                        "message": violation.to_string(),
                    })
                })
                .collect();
            let body = Json(json!({
                "error": self.to_string(),
                "violations": violations,
            }));
            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RulesError> for AppError {
    fn from(value: RulesError) -> Self {
        Self::Rules(value)
    }
}

impl From<IntakeRejection> for AppError {
    fn from(value: IntakeRejection) -> Self {
        Self::Intake(value)
    }
}
