//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Area this table belongs to
    pub area_id: i64,
    /// Display name, unique within its area (T1, T2, ...)
    pub name: String,
    /// Maximum number of guests the table seats
    pub capacity: i32,
    pub is_active: bool,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub area_id: i64,
    pub name: String,
    pub capacity: i32,
}

/// Update table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub area_id: Option<i64>,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}
