//! Error types for the storage layer.

use thiserror::Error;

/// Errors surfaced by [`crate::FeedbackStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unavailable or internally inconsistent; retryable.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A value read back from the store did not decode as expected.
    #[error("corrupt record for key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
