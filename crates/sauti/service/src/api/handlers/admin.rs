//! Admin query handlers (api-key gated).

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use sauti_analytics::Overview;
use sauti_pipeline::JobRecord;
use sauti_types::{EntityKey, EntityStats, EntityType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListEntitiesQuery {
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListEntitiesResponse {
    pub entities: Vec<EntityStats>,
    pub count: usize,
    pub filter: String,
}

/// All known entities, ranked by average score.
pub async fn list_entities(
    State(state): State<AppState>,
    Query(query): Query<ListEntitiesQuery>,
) -> ApiResult<Json<ListEntitiesResponse>> {
    let filter = query
        .entity_type
        .as_deref()
        .map(parse_entity_type)
        .transpose()?;

    let entities = state.analytics.all_entities(filter).await?;
    Ok(Json(ListEntitiesResponse {
        count: entities.len(),
        filter: filter.map_or_else(|| "all".to_string(), |t| t.to_string()),
        entities,
    }))
}

/// Fleet-wide overview.
pub async fn overview(State(state): State<AppState>) -> ApiResult<Json<Overview>> {
    Ok(Json(state.analytics.overview().await?))
}

#[derive(Debug, Serialize)]
pub struct EntityDetailResponse {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub stats: EntityStats,
    pub trend: Vec<f64>,
}

/// Statistics plus recent-score trend for one entity.
pub async fn entity_detail(
    State(state): State<AppState>,
    Path((raw_type, raw_id)): Path<(String, String)>,
) -> ApiResult<Json<EntityDetailResponse>> {
    let entity_type = parse_entity_type(&raw_type)?;
    // Route params normalize like every other ingress point.
    let key = EntityKey::new(entity_type, &raw_id);

    let stats = state
        .stats
        .stats(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("entity {key} not found")))?;
    let trend = state.stats.trend(&key).await?;

    Ok(Json(EntityDetailResponse {
        entity_type,
        entity_id: key.entity_id,
        stats,
        trend,
    }))
}

#[derive(Debug, Serialize)]
pub struct FailedJobsResponse {
    pub jobs: Vec<JobRecord>,
    pub count: usize,
}

/// Jobs that exhausted their retries, for operator inspection.
pub async fn failed_jobs(State(state): State<AppState>) -> Json<FailedJobsResponse> {
    let jobs = state.queue.failed_jobs();
    Json(FailedJobsResponse {
        count: jobs.len(),
        jobs,
    })
}

fn parse_entity_type(raw: &str) -> Result<EntityType, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid entity type: {raw}")))
}
