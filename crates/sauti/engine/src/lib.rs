//! Core processing engines for the feedback pipeline.
//!
//! Three pieces, all stateless between invocations and all working
//! through the shared [`sauti_store::FeedbackStore`]:
//!
//! - [`StatsEngine`] maintains the running `(count, avg)` pair and the
//!   bounded trend buffer per entity,
//! - [`Deduplicator`] decides whether a feedback id was already processed,
//! - [`AlertEngine`] raises low-sentiment alerts with cooldown suppression.

pub mod alert;
pub mod dedup;
pub mod error;
pub mod stats;

pub use alert::{AlertConfig, AlertEngine, LowSentimentAlert};
pub use dedup::Deduplicator;
pub use error::{EngineError, EngineResult};
pub use stats::{StatsEngine, TREND_MAX};
