//! Asynchronous feedback ingestion and processing.
//!
//! Producers enqueue [`sauti_types::FeedbackEvent`]s on the
//! [`FeedbackQueue`]; a bounded [`WorkerPool`] pulls them one at a time
//! per worker slot and runs each through the [`Processor`] state machine
//! (normalize, dedup, score, update stats, evaluate alert). Transient
//! failures retry the whole job with exponential backoff; exhausted jobs
//! land in an operator-visible failed state instead of vanishing.

pub mod config;
pub mod error;
pub mod job;
pub mod processor;
pub mod queue;
pub mod worker;

pub use config::PipelineConfig;
pub use error::{QueueError, QueueResult};
pub use job::{JobId, JobRecord, JobState};
pub use processor::{Outcome, Processor};
pub use queue::{FeedbackQueue, QueueCounts};
pub use worker::WorkerPool;
