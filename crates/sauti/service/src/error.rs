//! Error types for the service crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sauti_engine::EngineError;
use sauti_pipeline::QueueError;
use sauti_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors (startup and lifecycle).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for daemon lifecycle operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request-scoped API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    /// Rejected by policy; carries the enabled entity types for the caller.
    #[error("entity type \"{rejected}\" is disabled or not recognized")]
    TypeDisabled {
        rejected: String,
        enabled: Vec<sauti_types::EntityType>,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", None),
            ApiError::TypeDisabled { enabled, .. } => (
                StatusCode::FORBIDDEN,
                "TYPE_DISABLED",
                serde_json::to_value(enabled).ok().map(|v| {
                    serde_json::json!({ "enabled_types": v })
                }),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", None),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
