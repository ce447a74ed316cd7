//! The per-job processing state machine.

use sauti_engine::{AlertEngine, Deduplicator, EngineResult, StatsEngine};
use sauti_sentiment::SentimentAnalyzer;
use sauti_types::{EntityKey, EntityStats, FeedbackEvent};
use std::sync::Arc;

/// Terminal result of processing one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The feedback id was already processed; successful no-op.
    Duplicate,
    /// Statistics were updated; carries the freshly written values.
    Processed(EntityStats),
}

/// Wires normalizer, dedup, scorer, statistics and alerting into the
/// single path every job runs.
///
/// Every step is pure or idempotent-on-retry, so a transiently failed job
/// can always be re-run from the top: a retried duplicate simply becomes
/// a no-op.
pub struct Processor {
    dedup: Deduplicator,
    stats: StatsEngine,
    alerts: AlertEngine,
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl Processor {
    pub fn new(
        dedup: Deduplicator,
        stats: StatsEngine,
        alerts: AlertEngine,
        analyzer: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            dedup,
            stats,
            alerts,
            analyzer,
        }
    }

    pub async fn process(&self, event: &FeedbackEvent) -> EngineResult<Outcome> {
        // Normalization first, so every later step keys on canonical ids.
        let key = EntityKey::new(event.entity_type, &event.entity_id);

        if self
            .dedup
            .is_duplicate(event.entity_type, &event.feedback_id)
            .await?
        {
            tracing::debug!(
                feedback = %event.feedback_id,
                entity = %key,
                "duplicate feedback, skipping"
            );
            return Ok(Outcome::Duplicate);
        }

        let score = self.analyzer.analyze(&event.comment);
        tracing::debug!(
            entity = %key,
            normalized = score.normalized,
            label = %score.label,
            "comment scored"
        );

        let stats = self.stats.record(&key, score.normalized).await?;
        self.alerts.evaluate(&key, stats.avg, stats.count).await?;

        tracing::info!(
            entity = %key,
            avg = stats.avg,
            count = stats.count,
            "statistics updated"
        );
        Ok(Outcome::Processed(stats))
    }
}
