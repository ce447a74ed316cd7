//! REST API: router, shared state and handlers.

pub mod auth;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
