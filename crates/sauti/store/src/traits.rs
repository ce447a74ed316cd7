//! The atomic operations the pipeline requires of its storage collaborator.

use crate::StoreResult;
use async_trait::async_trait;
use sauti_types::{EntityKey, EntityType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The `(count, avg)` pair for one entity, read and written as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub count: u64,
    pub avg: f64,
}

/// Storage interface for the feedback pipeline.
///
/// Every method is a single atomic step against the shared store. The
/// count in [`Aggregate`] doubles as a version for compare-and-set, which
/// is what makes concurrent updates to one entity key lose nothing even
/// though no per-entity lock is ever taken.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Read the aggregate for a key. `None` means no feedback yet, which
    /// is distinct from a zero average.
    async fn get_aggregate(&self, key: &EntityKey) -> StoreResult<Option<Aggregate>>;

    /// Write `new` iff the stored count still equals `expected_count`
    /// (0 when the record must not exist yet). Returns whether the write
    /// took effect; callers re-read and retry on `false`.
    async fn compare_and_set_aggregate(
        &self,
        key: &EntityKey,
        expected_count: u64,
        new: Aggregate,
    ) -> StoreResult<bool>;

    /// Append a score to the trend buffer and trim it to the most recent
    /// `cap` entries, as one atomic step.
    async fn push_trend(&self, key: &EntityKey, score: f64, cap: usize) -> StoreResult<()>;

    /// Trend buffer contents, oldest to newest. Empty when absent.
    async fn trend(&self, key: &EntityKey) -> StoreResult<Vec<f64>>;

    /// Atomically add a feedback id to the processed set for an entity
    /// type. Returns `true` when newly inserted, `false` when already
    /// present. The add is the dedup check; there is no separate
    /// check-then-insert.
    async fn add_processed(&self, entity_type: EntityType, feedback_id: &str)
        -> StoreResult<bool>;

    /// Atomically set a cooldown marker for a key iff none is currently
    /// active. Returns `true` when acquired. The marker expires on its own
    /// after `ttl`.
    async fn acquire_cooldown(&self, key: &EntityKey, ttl: Duration) -> StoreResult<bool>;

    /// Enumerate every entity key with an aggregate record, optionally
    /// restricted to one type. Full scan; acceptable at fleet scale.
    async fn entity_keys(&self, filter: Option<EntityType>) -> StoreResult<Vec<EntityKey>>;
}
