//! Area Model

use serde::{Deserialize, Serialize};

/// Area entity, a physical zone of the restaurant (Main Hall, Garden, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
