//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`areas`] - 区域管理接口
//! - [`tables`] - 桌台管理接口
//! - [`slots`] - 时段查询接口
//! - [`menu_items`] - 菜单管理接口
//! - [`availability`] - 空桌查询接口
//! - [`reservations`] - 预订管理接口

use axum::Router;

use crate::core::ServerState;

pub mod health;

// Catalog APIs
pub mod areas;
pub mod menu_items;
pub mod slots;
pub mod tables;

// Booking APIs
pub mod availability;
pub mod reservations;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        // Catalog APIs
        .merge(areas::router())
        .merge(tables::router())
        .merge(slots::router())
        .merge(menu_items::router())
        // Booking APIs
        .merge(availability::router())
        .merge(reservations::router())
}
