use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A request field that failed validation, and why.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Error during phonemization: {0}")]
    Phonemization(String),

    #[error("Upstream not configured: {0}")]
    #[cfg_attr(not(feature = "reverse-lookup"), allow(dead_code))]
    Configuration(String),

    #[error("Upstream call failed: {0}")]
    #[cfg_attr(not(feature = "reverse-lookup"), allow(dead_code))]
    Upstream(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                e.reason,
                Some(e.field),
            ),
            AppError::Phonemization(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PHONEMIZATION_ERROR",
                format!("Error during phonemization: {}", msg),
                None,
            ),
            AppError::Configuration(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIGURATION_ERROR",
                msg,
                None,
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                msg,
                None,
            ),
        };

        match &field {
            Some(field) => tracing::warn!("Request rejected: {} - {}: {}", code, field, message),
            None => tracing::error!("Request failed: {} - {}", code, message),
        }

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
                field,
            }),
        )
            .into_response()
    }
}
