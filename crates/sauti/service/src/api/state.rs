//! Application state for API handlers.

use crate::config::ServiceConfig;
use sauti_analytics::AnalyticsService;
use sauti_engine::StatsEngine;
use sauti_pipeline::FeedbackQueue;
use std::sync::Arc;

/// Shared state injected into every handler.
///
/// Everything is constructed once at startup by the entry point and
/// injected here; no component reaches for global handles.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<FeedbackQueue>,
    pub stats: Arc<StatsEngine>,
    pub analytics: Arc<AnalyticsService>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(
        queue: Arc<FeedbackQueue>,
        stats: Arc<StatsEngine>,
        analytics: Arc<AnalyticsService>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            queue,
            stats,
            analytics,
            config,
        }
    }
}
