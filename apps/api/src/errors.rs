use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::classify::LineRole;

/// Fatal configuration errors. Classification and layout never fail on text;
/// only geometry or styles that cannot hold a single line are rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    #[error("page geometry too small: {reason}")]
    GeometryTooSmall { reason: String },

    #[error("invalid style for {role:?}: {reason}")]
    InvalidStyle { role: LineRole, reason: String },
}

/// A non-fatal fallback taken while producing a plan. Recorded on the output so the
/// caller can show "could not structure document, showing best-effort layout".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// The input had no non-blank lines; a single empty PlainText line was laid out.
    InputEmpty,
    /// A supplied structuring hint failed validation and was discarded.
    InvalidHint { reason: String },
    /// The hint producer failed or timed out; no hint was available.
    HintUnavailable { reason: String },
    /// No text-measurement function was supplied; a fixed per-character estimate was used.
    MeasurementUnavailable,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LayoutError> for AppError {
    fn from(e: LayoutError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
