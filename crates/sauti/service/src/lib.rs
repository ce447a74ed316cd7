//! Sauti HTTP boundary.
//!
//! Thin plumbing around the pipeline: validated ingestion, admin queries
//! gated by a shared-secret key, and server lifecycle. All invariants
//! live below this layer.

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::{FeatureFlags, ServiceConfig};
pub use error::{ApiError, ApiResult, ServiceError, ServiceResult};
pub use server::Server;
