//! Incremental per-entity statistics.
//!
//! Maintains a streaming mean per entity key, O(1) per update with no raw
//! score retention, plus a bounded recent-history buffer for display.

use crate::{EngineError, EngineResult};
use sauti_store::{Aggregate, FeedbackStore};
use sauti_types::{EntityKey, EntityStats};
use std::sync::Arc;

/// Trend buffer capacity per entity.
pub const TREND_MAX: usize = 20;

/// Stored averages are rounded to 4 decimals to bound representation
/// drift; intermediate math runs at full precision.
const AVG_PRECISION: f64 = 10_000.0;

/// How many times one update retries its compare-and-set before giving up.
/// Every lost attempt means another writer committed, so bounded retries
/// only trip under pathological contention on a single entity.
const MAX_CAS_ATTEMPTS: u32 = 64;

/// Streaming statistics engine over the shared store.
pub struct StatsEngine {
    store: Arc<dyn FeedbackStore>,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Fold one new score into the entity's running statistics and append
    /// it to the trend buffer.
    ///
    /// The `(count, avg)` pair is written as one compare-and-set keyed on
    /// the prior count, so two workers updating the same entity
    /// concurrently serialize instead of losing an update; the loser
    /// re-reads and recomputes.
    pub async fn record(&self, key: &EntityKey, score: f64) -> EngineResult<EntityStats> {
        let mut attempts = 0;
        let written = loop {
            attempts += 1;
            let prior = self
                .store
                .get_aggregate(key)
                .await?
                .unwrap_or(Aggregate { count: 0, avg: 0.0 });

            let count = prior.count + 1;
            let avg = prior.avg + (score - prior.avg) / count as f64;
            let next = Aggregate {
                count,
                avg: (avg * AVG_PRECISION).round() / AVG_PRECISION,
            };

            if self
                .store
                .compare_and_set_aggregate(key, prior.count, next)
                .await?
            {
                break next;
            }

            if attempts >= MAX_CAS_ATTEMPTS {
                return Err(EngineError::UpdateContended {
                    key: key.to_string(),
                    attempts,
                });
            }
            tracing::trace!(%key, attempts, "aggregate CAS lost, retrying");
        };

        // The trend keeps the unrounded score; it is display-only and not
        // an input to the running mean.
        self.store.push_trend(key, score, TREND_MAX).await?;

        Ok(EntityStats {
            key: key.clone(),
            count: written.count,
            avg: written.avg,
        })
    }

    /// Current statistics, or `None` when the entity has no feedback yet.
    pub async fn stats(&self, key: &EntityKey) -> EngineResult<Option<EntityStats>> {
        Ok(self.store.get_aggregate(key).await?.map(|agg| EntityStats {
            key: key.clone(),
            count: agg.count,
            avg: agg.avg,
        }))
    }

    /// Recent scores, oldest to newest. Empty when absent.
    pub async fn trend(&self, key: &EntityKey) -> EngineResult<Vec<f64>> {
        Ok(self.store.trend(key).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauti_store::InMemoryFeedbackStore;
    use sauti_types::EntityType;

    fn setup() -> (StatsEngine, EntityKey) {
        let store = Arc::new(InMemoryFeedbackStore::new());
        (StatsEngine::new(store), EntityKey::new(EntityType::Driver, "7"))
    }

    #[tokio::test]
    async fn test_first_update_creates_stats() {
        let (engine, key) = setup();
        let stats = engine.record(&key, 4.0).await.unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.avg, 4.0);
    }

    #[tokio::test]
    async fn test_running_mean_matches_arithmetic_mean() {
        let (engine, key) = setup();
        let scores = [1.0, 5.0, 3.2, 2.7, 4.9, 1.1, 3.3];
        for s in scores {
            engine.record(&key, s).await.unwrap();
        }

        let stats = engine.stats(&key).await.unwrap().unwrap();
        let expected: f64 = scores.iter().sum::<f64>() / scores.len() as f64;
        assert_eq!(stats.count, scores.len() as u64);
        assert!((stats.avg - expected).abs() < 1e-3, "avg {} vs {}", stats.avg, expected);
    }

    #[tokio::test]
    async fn test_avg_rounded_to_four_decimals() {
        let (engine, key) = setup();
        engine.record(&key, 1.0).await.unwrap();
        let stats = engine.record(&key, 2.0).await.unwrap();
        // 1.5 exactly; also assert the representation has no drift digits.
        assert_eq!(stats.avg, (stats.avg * 10_000.0).round() / 10_000.0);
    }

    #[tokio::test]
    async fn test_absent_stats_distinct_from_zero() {
        let (engine, key) = setup();
        assert!(engine.stats(&key).await.unwrap().is_none());
        assert!(engine.trend(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trend_keeps_last_n_in_order() {
        let (engine, key) = setup();
        for i in 0..(TREND_MAX + 5) {
            engine.record(&key, i as f64).await.unwrap();
        }
        let trend = engine.trend(&key).await.unwrap();
        assert_eq!(trend.len(), TREND_MAX);
        assert_eq!(trend[0], 5.0);
        assert_eq!(*trend.last().unwrap(), (TREND_MAX + 4) as f64);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_updates_lose_nothing() {
        let store = Arc::new(InMemoryFeedbackStore::new());
        let key = EntityKey::new(EntityType::Trip, "42");

        let mut handles = Vec::new();
        for i in 0..50u32 {
            let engine = StatsEngine::new(store.clone());
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                engine.record(&key, (i % 5 + 1) as f64).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let engine = StatsEngine::new(store);
        let stats = engine.stats(&key).await.unwrap().unwrap();
        assert_eq!(stats.count, 50);
    }
}
