//! Shared-secret gate for the admin query surface.

use crate::api::state::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

const API_KEY_HEADER: &str = "x-api-key";

/// Reject requests whose `x-api-key` header does not match the configured
/// shared secret.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == state.config.api_key => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}
