//! In-memory reference implementation of [`FeedbackStore`].
//!
//! Backed by sharded concurrent maps so every trait method really is one
//! atomic step, matching what the contract demands of a production
//! backend. Cooldown markers carry their expiry instant and are checked
//! lazily on acquisition; nothing sweeps them in the background.

use crate::traits::{Aggregate, FeedbackStore};
use crate::StoreResult;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use sauti_types::{EntityKey, EntityType};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// In-memory store adapter.
#[derive(Default)]
pub struct InMemoryFeedbackStore {
    aggregates: DashMap<EntityKey, Aggregate>,
    trends: DashMap<EntityKey, VecDeque<f64>>,
    processed: DashSet<(EntityType, String)>,
    cooldowns: DashMap<EntityKey, Instant>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn get_aggregate(&self, key: &EntityKey) -> StoreResult<Option<Aggregate>> {
        Ok(self.aggregates.get(key).map(|r| *r.value()))
    }

    async fn compare_and_set_aggregate(
        &self,
        key: &EntityKey,
        expected_count: u64,
        new: Aggregate,
    ) -> StoreResult<bool> {
        match self.aggregates.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().count == expected_count {
                    occupied.insert(new);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                if expected_count == 0 {
                    vacant.insert(new);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    async fn push_trend(&self, key: &EntityKey, score: f64, cap: usize) -> StoreResult<()> {
        let mut buffer = self.trends.entry(key.clone()).or_default();
        buffer.push_back(score);
        while buffer.len() > cap {
            buffer.pop_front();
        }
        Ok(())
    }

    async fn trend(&self, key: &EntityKey) -> StoreResult<Vec<f64>> {
        Ok(self
            .trends
            .get(key)
            .map(|b| b.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn add_processed(
        &self,
        entity_type: EntityType,
        feedback_id: &str,
    ) -> StoreResult<bool> {
        Ok(self.processed.insert((entity_type, feedback_id.to_string())))
    }

    async fn acquire_cooldown(&self, key: &EntityKey, ttl: Duration) -> StoreResult<bool> {
        let now = Instant::now();
        match self.cooldowns.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                if *occupied.get() > now {
                    Ok(false)
                } else {
                    occupied.insert(now + ttl);
                    Ok(true)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(now + ttl);
                Ok(true)
            }
        }
    }

    async fn entity_keys(&self, filter: Option<EntityType>) -> StoreResult<Vec<EntityKey>> {
        Ok(self
            .aggregates
            .iter()
            .map(|r| r.key().clone())
            .filter(|k| filter.map_or(true, |t| k.entity_type == t))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> EntityKey {
        EntityKey::new(EntityType::Driver, id)
    }

    #[tokio::test]
    async fn test_cas_creates_only_from_zero() {
        let store = InMemoryFeedbackStore::new();
        let k = key("1");
        let first = Aggregate { count: 1, avg: 4.0 };

        assert!(!store.compare_and_set_aggregate(&k, 5, first).await.unwrap());
        assert!(store.compare_and_set_aggregate(&k, 0, first).await.unwrap());
        assert_eq!(store.get_aggregate(&k).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_cas_rejects_stale_count() {
        let store = InMemoryFeedbackStore::new();
        let k = key("1");
        let v1 = Aggregate { count: 1, avg: 4.0 };
        let v2 = Aggregate { count: 2, avg: 3.0 };

        store.compare_and_set_aggregate(&k, 0, v1).await.unwrap();
        assert!(store.compare_and_set_aggregate(&k, 1, v2).await.unwrap());
        // A writer that read count=1 before the update above must lose.
        assert!(!store
            .compare_and_set_aggregate(&k, 1, Aggregate { count: 2, avg: 5.0 })
            .await
            .unwrap());
        assert_eq!(store.get_aggregate(&k).await.unwrap(), Some(v2));
    }

    #[tokio::test]
    async fn test_trend_trims_fifo() {
        let store = InMemoryFeedbackStore::new();
        let k = key("1");
        for i in 0..7 {
            store.push_trend(&k, i as f64, 5).await.unwrap();
        }
        assert_eq!(store.trend(&k).await.unwrap(), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[tokio::test]
    async fn test_processed_set_is_add_once() {
        let store = InMemoryFeedbackStore::new();
        assert!(store.add_processed(EntityType::Trip, "fb-1").await.unwrap());
        assert!(!store.add_processed(EntityType::Trip, "fb-1").await.unwrap());
        // Scoped per type: the same id under another type is new.
        assert!(store.add_processed(EntityType::App, "fb-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_cooldown_acquire_and_expiry() {
        let store = InMemoryFeedbackStore::new();
        let k = key("1");
        let ttl = Duration::from_millis(30);

        assert!(store.acquire_cooldown(&k, ttl).await.unwrap());
        assert!(!store.acquire_cooldown(&k, ttl).await.unwrap());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.acquire_cooldown(&k, ttl).await.unwrap());
    }

    #[tokio::test]
    async fn test_entity_keys_filterable() {
        let store = InMemoryFeedbackStore::new();
        let agg = Aggregate { count: 1, avg: 3.0 };
        let d = EntityKey::new(EntityType::Driver, "1");
        let t = EntityKey::new(EntityType::Trip, "1");
        store.compare_and_set_aggregate(&d, 0, agg).await.unwrap();
        store.compare_and_set_aggregate(&t, 0, agg).await.unwrap();

        assert_eq!(store.entity_keys(None).await.unwrap().len(), 2);
        let trips = store.entity_keys(Some(EntityType::Trip)).await.unwrap();
        assert_eq!(trips, vec![t]);
    }
}
