//! Job records tracked by the ingestion queue.

use chrono::{DateTime, Utc};
use sauti_types::FeedbackEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier assigned to a queued feedback job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job:{}", self.0)
    }
}

/// Lifecycle state of one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Active,
    /// Terminal success, including the duplicate no-op case.
    Completed,
    /// Terminal failure after exhausting retries. Retained for operators.
    Failed,
}

/// One tracked job: the immutable event plus processing bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub event: FeedbackEvent,
    pub state: JobState,
    pub attempts: u32,
    pub enqueued_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl JobRecord {
    pub fn new(id: JobId, event: FeedbackEvent) -> Self {
        Self {
            id,
            event,
            state: JobState::Queued,
            attempts: 0,
            enqueued_at: Utc::now(),
            finished_at: None,
            last_error: None,
        }
    }
}
