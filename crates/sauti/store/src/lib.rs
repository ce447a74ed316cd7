//! Storage contract for the feedback pipeline.
//!
//! The pipeline owns no state between jobs; everything lives behind the
//! [`FeedbackStore`] trait as a small set of atomic operations. Production
//! deployments back this with a shared keyspace store; the in-memory
//! adapter here is deterministic and test-friendly.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryFeedbackStore;
pub use traits::{Aggregate, FeedbackStore};
