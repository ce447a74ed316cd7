//! Error types for the engine crate.

use sauti_store::StoreError;
use thiserror::Error;

/// Errors from statistics, dedup and alert engines.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The underlying store failed; the whole job is retryable.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The optimistic update loop gave up under sustained contention.
    #[error("statistics update for {key} still contended after {attempts} attempts")]
    UpdateContended { key: String, attempts: u32 },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
