//! Data models
//!
//! Shared between booking-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake values (SQLite INTEGER PRIMARY KEY).

pub mod area;
pub mod dining_table;
pub mod menu_item;
pub mod reservation;
pub mod time_slot;

// Re-exports
pub use area::*;
pub use dining_table::*;
pub use menu_item::*;
pub use reservation::*;
pub use time_slot::*;
