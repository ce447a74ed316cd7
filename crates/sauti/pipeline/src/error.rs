//! Error types for the pipeline crate.

use thiserror::Error;

/// Errors surfaced to producers enqueuing feedback.
#[derive(Debug, Error)]
pub enum QueueError {
    /// All workers have shut down; nothing will consume the event.
    #[error("queue is closed")]
    Closed,
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;
