//! Router-level tests over the in-memory stack.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sauti_analytics::AnalyticsService;
use sauti_engine::StatsEngine;
use sauti_pipeline::{FeedbackQueue, JobId, PipelineConfig};
use sauti_service::api::{create_router, AppState};
use sauti_service::{FeatureFlags, ServiceConfig};
use sauti_store::{Aggregate, FeedbackStore, InMemoryFeedbackStore};
use sauti_types::{EntityKey, EntityType};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::ServiceExt;

const TEST_KEY: &str = "test-secret";

struct Harness {
    router: Router,
    store: Arc<InMemoryFeedbackStore>,
    queue: Arc<FeedbackQueue>,
    // Held so enqueues do not observe a closed channel.
    _rx: mpsc::Receiver<JobId>,
}

fn setup(features: FeatureFlags) -> Harness {
    let store = Arc::new(InMemoryFeedbackStore::new());
    let dyn_store: Arc<dyn FeedbackStore> = store.clone();

    let config = Arc::new(ServiceConfig {
        api_key: TEST_KEY.to_string(),
        features,
        ..Default::default()
    });
    let (queue, rx) = FeedbackQueue::new(&PipelineConfig::default());
    let queue = Arc::new(queue);

    let state = AppState::new(
        queue.clone(),
        Arc::new(StatsEngine::new(dyn_store.clone())),
        Arc::new(AnalyticsService::new(dyn_store)),
        config,
    );

    Harness {
        router: create_router(state),
        store,
        queue,
        _rx: rx,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_feedback(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/feedback")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_submit_queues_feedback() {
    let h = setup(FeatureFlags::default());

    let (status, body) = send(
        &h.router,
        post_feedback(json!({
            "entity_type": "driver",
            "entity_id": "001",
            "comment": "very friendly driver"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
    assert!(body["feedback_id"].as_str().unwrap().starts_with("driver-1-"));
    assert_eq!(h.queue.counts().queued, 1);
}

#[tokio::test]
async fn test_submit_missing_fields_rejected() {
    let h = setup(FeatureFlags::default());

    let (status, _) = send(
        &h.router,
        post_feedback(json!({ "entity_type": "driver", "entity_id": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &h.router,
        post_feedback(json!({
            "entity_type": "driver",
            "entity_id": "1",
            "comment": "   "
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.queue.counts().queued, 0);
}

#[tokio::test]
async fn test_submit_disabled_type_rejected_with_enabled_set() {
    let h = setup(FeatureFlags {
        marshal: false,
        ..Default::default()
    });

    let (status, body) = send(
        &h.router,
        post_feedback(json!({
            "entity_type": "marshal",
            "entity_id": "m1",
            "comment": "helpful marshal"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let enabled = body["details"]["enabled_types"].as_array().unwrap();
    assert_eq!(enabled.len(), 3);
    assert!(!enabled.contains(&json!("marshal")));
}

#[tokio::test]
async fn test_unknown_type_treated_as_policy_rejection() {
    let h = setup(FeatureFlags::default());
    let (status, _) = send(
        &h.router,
        post_feedback(json!({
            "entity_type": "conductor",
            "entity_id": "1",
            "comment": "fine"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_requires_api_key() {
    let h = setup(FeatureFlags::default());

    let (status, _) = send(&h.router, admin_get("/api/admin/overview", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&h.router, admin_get("/api/admin/overview", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&h.router, admin_get("/api/admin/overview", Some(TEST_KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_entities"], 0);
}

#[tokio::test]
async fn test_entity_detail_not_found_then_found() {
    let h = setup(FeatureFlags::default());

    let (status, _) = send(
        &h.router,
        admin_get("/api/admin/entities/driver/1", Some(TEST_KEY)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let key = EntityKey::new(EntityType::Driver, "1");
    h.store
        .compare_and_set_aggregate(&key, 0, Aggregate { count: 2, avg: 4.2 })
        .await
        .unwrap();
    h.store.push_trend(&key, 4.0, 20).await.unwrap();
    h.store.push_trend(&key, 4.4, 20).await.unwrap();

    // Raw "001" in the path resolves to the canonical entity.
    let (status, body) = send(
        &h.router,
        admin_get("/api/admin/entities/driver/001", Some(TEST_KEY)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entity_id"], "1");
    assert_eq!(body["stats"]["count"], 2);
    assert_eq!(body["trend"], json!([4.0, 4.4]));
}

#[tokio::test]
async fn test_list_entities_filter_validation() {
    let h = setup(FeatureFlags::default());
    let (status, _) = send(
        &h.router,
        admin_get("/api/admin/entities?type=bus", Some(TEST_KEY)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &h.router,
        admin_get("/api/admin/entities?type=trip", Some(TEST_KEY)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"], "trip");
}
