//! Low-sentiment alerting.
//!
//! Level-triggered with a suppression window: every qualifying update
//! while no cooldown is active fires once, then the entity goes silent for
//! the cooldown TTL regardless of how its average moves.

use crate::EngineResult;
use chrono::{DateTime, Utc};
use sauti_store::FeedbackStore;
use sauti_types::EntityKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Alerting thresholds, supplied by the service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Averages at or above this never alert.
    pub threshold: f64,
    /// Minimum feedback count before an entity can alert.
    pub min_reviews: u64,
    /// Suppression window after a fired alert.
    pub cooldown_ttl: Duration,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            min_reviews: 3,
            cooldown_ttl: Duration::from_secs(3600),
        }
    }
}

/// Alert raised for an entity whose average dropped below the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowSentimentAlert {
    pub key: EntityKey,
    pub avg: f64,
    pub count: u64,
    pub threshold: f64,
    pub raised_at: DateTime<Utc>,
}

/// Evaluates fresh statistics against the alert rule.
pub struct AlertEngine {
    store: Arc<dyn FeedbackStore>,
    config: AlertConfig,
    alert_tx: broadcast::Sender<LowSentimentAlert>,
}

impl AlertEngine {
    pub fn new(store: Arc<dyn FeedbackStore>, config: AlertConfig) -> Self {
        let (alert_tx, _) = broadcast::channel(256);
        Self {
            store,
            config,
            alert_tx,
        }
    }

    /// Subscribe to fired alerts.
    pub fn subscribe(&self) -> broadcast::Receiver<LowSentimentAlert> {
        self.alert_tx.subscribe()
    }

    /// Evaluate an entity's freshly written statistics. Short-circuits in
    /// order: healthy average, insufficient sample, active cooldown. When
    /// none apply the alert fires and the cooldown starts.
    ///
    /// Returns the fired alert, or `None` when suppressed.
    pub async fn evaluate(
        &self,
        key: &EntityKey,
        avg: f64,
        count: u64,
    ) -> EngineResult<Option<LowSentimentAlert>> {
        if avg >= self.config.threshold {
            return Ok(None);
        }
        if count < self.config.min_reviews {
            return Ok(None);
        }
        // Acquiring the cooldown marker and checking it are one atomic
        // step, so concurrent qualifying updates fire exactly once.
        if !self
            .store
            .acquire_cooldown(key, self.config.cooldown_ttl)
            .await?
        {
            return Ok(None);
        }

        let alert = LowSentimentAlert {
            key: key.clone(),
            avg,
            count,
            threshold: self.config.threshold,
            raised_at: Utc::now(),
        };

        tracing::warn!(
            key = %alert.key,
            avg = alert.avg,
            count = alert.count,
            threshold = alert.threshold,
            "low sentiment alert"
        );
        // Nobody listening is fine; the log line above is the baseline sink.
        let _ = self.alert_tx.send(alert.clone());

        Ok(Some(alert))
    }
}
