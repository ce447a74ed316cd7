//! The ingestion queue and its job registry.

use crate::job::{JobId, JobRecord, JobState};
use crate::{PipelineConfig, QueueError, QueueResult};
use chrono::Utc;
use dashmap::DashMap;
use sauti_types::FeedbackEvent;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Counts per job state, for status endpoints and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    pub queued: usize,
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Buffers feedback events for asynchronous, at-least-once processing.
///
/// Producers get a job id back immediately; workers drain the bounded
/// channel. Every job keeps a [`JobRecord`] in the registry until the
/// retention caps prune it, so completions and failures stay inspectable.
pub struct FeedbackQueue {
    tx: mpsc::Sender<JobId>,
    jobs: DashMap<JobId, JobRecord>,
    // Terminal records in finish order, pruned to the retention caps.
    completed_order: Mutex<VecDeque<JobId>>,
    failed_order: Mutex<VecDeque<JobId>>,
    completed_retention: usize,
    failed_retention: usize,
}

impl FeedbackQueue {
    /// Build the queue and hand back the receiving half for the worker
    /// pool.
    pub fn new(config: &PipelineConfig) -> (Self, mpsc::Receiver<JobId>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let queue = Self {
            tx,
            jobs: DashMap::new(),
            completed_order: Mutex::new(VecDeque::new()),
            failed_order: Mutex::new(VecDeque::new()),
            completed_retention: config.completed_retention,
            failed_retention: config.failed_retention,
        };
        (queue, rx)
    }

    /// Durably register an event and hand it to the workers.
    pub async fn enqueue(&self, event: FeedbackEvent) -> QueueResult<JobId> {
        let id = JobId::generate();
        self.jobs.insert(id, JobRecord::new(id, event));

        if self.tx.send(id).await.is_err() {
            self.jobs.remove(&id);
            return Err(QueueError::Closed);
        }

        tracing::debug!(job = %id, "feedback enqueued");
        Ok(id)
    }

    /// Look up one job record.
    pub fn job(&self, id: &JobId) -> Option<JobRecord> {
        self.jobs.get(id).map(|r| r.value().clone())
    }

    /// All retained failed jobs, for operator inspection.
    pub fn failed_jobs(&self) -> Vec<JobRecord> {
        let order = self
            .failed_order
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        order
            .iter()
            .filter_map(|id| self.jobs.get(id).map(|r| r.value().clone()))
            .collect()
    }

    /// Counts per state.
    pub fn counts(&self) -> QueueCounts {
        let mut counts = QueueCounts::default();
        for r in self.jobs.iter() {
            match r.value().state {
                JobState::Queued => counts.queued += 1,
                JobState::Active => counts.active += 1,
                JobState::Completed => counts.completed += 1,
                JobState::Failed => counts.failed += 1,
            }
        }
        counts
    }

    pub(crate) fn mark_active(&self, id: &JobId) {
        if let Some(mut r) = self.jobs.get_mut(id) {
            r.state = JobState::Active;
            r.attempts += 1;
        }
    }

    pub(crate) fn mark_completed(&self, id: &JobId) {
        if let Some(mut r) = self.jobs.get_mut(id) {
            r.state = JobState::Completed;
            r.finished_at = Some(Utc::now());
        }
        self.retain(id, JobState::Completed);
    }

    pub(crate) fn mark_failed(&self, id: &JobId, error: &str) {
        if let Some(mut r) = self.jobs.get_mut(id) {
            r.state = JobState::Failed;
            r.finished_at = Some(Utc::now());
            r.last_error = Some(error.to_string());
        }
        self.retain(id, JobState::Failed);
    }

    pub(crate) fn record_attempt_error(&self, id: &JobId, error: &str) {
        if let Some(mut r) = self.jobs.get_mut(id) {
            r.last_error = Some(error.to_string());
        }
    }

    fn retain(&self, id: &JobId, state: JobState) {
        let (order, cap) = match state {
            JobState::Completed => (&self.completed_order, self.completed_retention),
            JobState::Failed => (&self.failed_order, self.failed_retention),
            _ => return,
        };

        let mut order = order.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        order.push_back(*id);
        while order.len() > cap {
            if let Some(evicted) = order.pop_front() {
                self.jobs.remove(&evicted);
            }
        }
    }
}
