//! API router configuration.

use super::auth::require_api_key;
use super::handlers;
use super::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/entities", get(handlers::admin::list_entities))
        .route("/overview", get(handlers::admin::overview))
        .route("/entities/:type/:id", get(handlers::admin::entity_detail))
        .route("/jobs/failed", get(handlers::admin::failed_jobs))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let api_routes = Router::new()
        .route("/feedback", post(handlers::feedback::submit))
        .route("/feedback/flags", get(handlers::feedback::feature_flags))
        .nest("/admin", admin_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
