//! Read-side analytics over all entities' statistics.
//!
//! Pure queries over the shared store: ranking, sentiment distribution
//! and per-type rollups. Discovery is a full scan over aggregate records,
//! which is deliberate and fine at fleet scale; nothing here is indexed
//! or incremental.

use sauti_store::{FeedbackStore, StoreResult};
use sauti_types::{EntityKey, EntityStats, EntityType, SentimentLabel};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How many entities the overview's ranking carries.
const TOP_ENTITIES: usize = 10;

/// Entity counts per sentiment bucket, classified by current average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// Rollup for one entity type.
///
/// `avg_score` is the unweighted mean of the per-entity averages, not a
/// feedback-count-weighted mean. That matches the reporting contract;
/// keep it that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TypeRollup {
    /// Total feedback volume across entities of this type.
    pub count: u64,
    /// Unweighted mean of entity averages, rounded to 2 decimals.
    pub avg_score: f64,
}

/// Fleet-wide overview.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_entities: usize,
    pub total_feedback: u64,
    pub distribution: Distribution,
    pub by_type: BTreeMap<EntityType, TypeRollup>,
    pub top_entities: Vec<EntityStats>,
}

/// Cross-entity queries, read-only over the store.
pub struct AnalyticsService {
    store: Arc<dyn FeedbackStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Every known entity's statistics, sorted by average descending.
    /// Ties break on the key, so one call's ordering is reproducible.
    pub async fn all_entities(
        &self,
        filter: Option<EntityType>,
    ) -> StoreResult<Vec<EntityStats>> {
        let keys = self.store.entity_keys(filter).await?;

        let mut entities = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(agg) = self.store.get_aggregate(&key).await? {
                entities.push(EntityStats {
                    key,
                    count: agg.count,
                    avg: agg.avg,
                });
            }
        }

        entities.sort_by(|a, b| {
            b.avg
                .partial_cmp(&a.avg)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| key_order(&a.key).cmp(&key_order(&b.key)))
        });
        Ok(entities)
    }

    /// Fleet-wide rollup: totals, sentiment distribution, per-type
    /// averages and the top ranked entities.
    pub async fn overview(&self) -> StoreResult<Overview> {
        let all = self.all_entities(None).await?;

        let total_feedback = all.iter().map(|e| e.count).sum();
        let mut distribution = Distribution::default();
        let mut by_type: BTreeMap<EntityType, TypeRollup> = EntityType::ALL
            .iter()
            .map(|t| (*t, TypeRollup::default()))
            .collect();
        let mut type_avg_sums: BTreeMap<EntityType, (f64, u64)> = BTreeMap::new();

        for entity in &all {
            match SentimentLabel::from_score(entity.avg) {
                SentimentLabel::Positive => distribution.positive += 1,
                SentimentLabel::Neutral => distribution.neutral += 1,
                SentimentLabel::Negative => distribution.negative += 1,
            }

            let rollup = by_type.entry(entity.key.entity_type).or_default();
            rollup.count += entity.count;

            let (sum, n) = type_avg_sums.entry(entity.key.entity_type).or_default();
            *sum += entity.avg;
            *n += 1;
        }

        for (entity_type, (sum, n)) in type_avg_sums {
            if n > 0 {
                let mean = sum / n as f64;
                if let Some(rollup) = by_type.get_mut(&entity_type) {
                    rollup.avg_score = (mean * 100.0).round() / 100.0;
                }
            }
        }

        Ok(Overview {
            total_entities: all.len(),
            total_feedback,
            distribution,
            top_entities: all.into_iter().take(TOP_ENTITIES).collect(),
            by_type,
        })
    }
}

fn key_order(key: &EntityKey) -> (EntityType, &str) {
    (key.entity_type, key.entity_id.as_str())
}
