//! API handlers.

pub mod admin;
pub mod feedback;
