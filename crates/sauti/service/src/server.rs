//! Server assembly and lifecycle.

use crate::api::{create_router, AppState};
use crate::config::ServiceConfig;
use crate::error::ServiceResult;
use sauti_analytics::AnalyticsService;
use sauti_engine::{AlertEngine, Deduplicator, StatsEngine};
use sauti_pipeline::{FeedbackQueue, Processor, WorkerPool};
use sauti_sentiment::LexiconAnalyzer;
use sauti_store::{FeedbackStore, InMemoryFeedbackStore};
use std::sync::Arc;
use tokio::net::TcpListener;

/// The sauti daemon: store, engines, worker pool and HTTP surface.
///
/// The store client is constructed here, once, and injected into every
/// component; the entry point owns its lifecycle.
pub struct Server {
    config: Arc<ServiceConfig>,
    state: AppState,
    pool: WorkerPool,
}

impl Server {
    pub fn new(config: ServiceConfig) -> Self {
        let config = Arc::new(config);
        let store: Arc<dyn FeedbackStore> = Arc::new(InMemoryFeedbackStore::new());

        let (queue, rx) = FeedbackQueue::new(&config.pipeline);
        let queue = Arc::new(queue);

        let processor = Arc::new(Processor::new(
            Deduplicator::new(store.clone()),
            StatsEngine::new(store.clone()),
            AlertEngine::new(store.clone(), config.alert.clone()),
            Arc::new(LexiconAnalyzer::new()),
        ));
        let pool = WorkerPool::spawn(queue.clone(), rx, processor, config.pipeline.clone());

        let state = AppState::new(
            queue,
            Arc::new(StatsEngine::new(store.clone())),
            Arc::new(AnalyticsService::new(store)),
            config.clone(),
        );

        Self {
            config,
            state,
            pool,
        }
    }

    /// Serve until interrupted, then drain in-flight jobs.
    pub async fn run(self) -> ServiceResult<()> {
        let app = create_router(self.state);
        let listener = TcpListener::bind(self.config.listen_addr).await?;

        tracing::info!(addr = %self.config.listen_addr, "sautid listening");
        tracing::info!(
            workers = self.config.pipeline.concurrency,
            threshold = self.config.alert.threshold,
            "pipeline started"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("shutting down, draining workers");
        self.pool.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
