//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item available for pre-ordering alongside a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Unit price in minor currency units (cents)
    pub price: i64,
    pub category: Option<String>,
    pub is_active: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: i64,
    pub category: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}
