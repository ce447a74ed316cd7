//! Feedback ingestion handlers.

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, Json};
use chrono::Utc;
use sauti_pipeline::JobId;
use sauti_types::{normalize_entity_id, EntityType, FeedbackEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Feedback submission body.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub comment: Option<String>,
    /// Caller-supplied dedup key; generated when absent.
    pub feedback_id: Option<String>,
}

/// Accepted-for-processing response.
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub status: &'static str,
    pub job_id: JobId,
    pub feedback_id: String,
    pub message: &'static str,
}

/// Accept one piece of feedback and queue it for async processing.
///
/// Validation happens synchronously and nothing invalid is ever
/// enqueued; once this returns 200 the caller never hears about
/// processing-time failures.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitFeedbackRequest>,
) -> ApiResult<Json<SubmitFeedbackResponse>> {
    let raw_type = body
        .entity_type
        .as_deref()
        .ok_or_else(|| missing_fields())?;
    // Normalize early so the canonical id is used everywhere below.
    let entity_id = normalize_entity_id(body.entity_id.as_deref().unwrap_or(""));
    let comment = body.comment.as_deref().unwrap_or("").trim();

    if entity_id.is_empty() || comment.is_empty() {
        return Err(missing_fields());
    }

    let entity_type: EntityType = raw_type
        .parse()
        .map_err(|_| type_disabled(&state, raw_type))?;
    if !state.config.features.enabled(entity_type) {
        return Err(type_disabled(&state, raw_type));
    }

    // Built on the normalized id so "001" and "1" share a dedup key.
    let feedback_id = body
        .feedback_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("{entity_type}-{entity_id}-{}", Uuid::new_v4()));

    let job_id = state
        .queue
        .enqueue(FeedbackEvent {
            entity_type,
            entity_id,
            feedback_id: feedback_id.clone(),
            comment: comment.to_string(),
            submitted_at: Utc::now(),
        })
        .await?;

    Ok(Json(SubmitFeedbackResponse {
        status: "queued",
        job_id,
        feedback_id,
        message: "feedback received and queued for async processing",
    }))
}

/// Feature-flag visibility response.
#[derive(Debug, Serialize)]
pub struct FeatureFlagsResponse {
    pub feature_flags: crate::config::FeatureFlags,
    pub enabled_types: Vec<EntityType>,
}

pub async fn feature_flags(State(state): State<AppState>) -> Json<FeatureFlagsResponse> {
    Json(FeatureFlagsResponse {
        feature_flags: state.config.features,
        enabled_types: state.config.features.enabled_types(),
    })
}

fn missing_fields() -> ApiError {
    ApiError::BadRequest("entity_type, entity_id and comment are required".to_string())
}

fn type_disabled(state: &AppState, rejected: &str) -> ApiError {
    ApiError::TypeDisabled {
        rejected: rejected.to_string(),
        enabled: state.config.features.enabled_types(),
    }
}
