//! Feedback deduplication.

use crate::EngineResult;
use sauti_store::FeedbackStore;
use sauti_types::EntityType;
use std::sync::Arc;

/// Decides whether a feedback id has already been durably processed.
///
/// The check is the store's atomic add-to-set: two workers racing on the
/// same id cannot both see "new". Ids are scoped per entity type, not per
/// entity — a client that reuses ids across entities of one type would
/// wrongly suppress the second, which is accepted as documented.
pub struct Deduplicator {
    store: Arc<dyn FeedbackStore>,
}

impl Deduplicator {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Returns `true` when this feedback id was already processed for the
    /// type. On `false` the id is now recorded as processed.
    pub async fn is_duplicate(
        &self,
        entity_type: EntityType,
        feedback_id: &str,
    ) -> EngineResult<bool> {
        let newly_added = self.store.add_processed(entity_type, feedback_id).await?;
        Ok(!newly_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauti_store::InMemoryFeedbackStore;

    #[tokio::test]
    async fn test_second_check_is_duplicate() {
        let dedup = Deduplicator::new(Arc::new(InMemoryFeedbackStore::new()));
        assert!(!dedup.is_duplicate(EntityType::Driver, "fb-1").await.unwrap());
        assert!(dedup.is_duplicate(EntityType::Driver, "fb-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_scope_is_per_entity_type() {
        let dedup = Deduplicator::new(Arc::new(InMemoryFeedbackStore::new()));
        assert!(!dedup.is_duplicate(EntityType::Driver, "fb-1").await.unwrap());
        assert!(!dedup.is_duplicate(EntityType::Marshal, "fb-1").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_checks_admit_exactly_one() {
        let store = Arc::new(InMemoryFeedbackStore::new());
        let mut handles = Vec::new();
        for _ in 0..20 {
            let dedup = Deduplicator::new(store.clone());
            handles.push(tokio::spawn(async move {
                dedup.is_duplicate(EntityType::Trip, "fb-x").await.unwrap()
            }));
        }

        let mut fresh = 0;
        for h in handles {
            if !h.await.unwrap() {
                fresh += 1;
            }
        }
        assert_eq!(fresh, 1);
    }
}
