//! Shared types for the Mesa booking system
//!
//! Data models and small utilities used by the booking server and by any
//! client that talks to its API. DB row types derive `sqlx::FromRow` behind
//! the `db` feature so API clients can depend on this crate without pulling
//! in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
