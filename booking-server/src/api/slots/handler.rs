//! Time Slot API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::TimeSlot;

use crate::core::ServerState;
use crate::db::repository::time_slot;
use crate::utils::{AppError, AppResult};

/// GET /api/slots - 获取可预订时段
///
/// 时段表为空时返回内置的整点时段
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TimeSlot>>> {
    let slots = state.booking.list_slots().await?;
    Ok(Json(slots))
}

/// GET /api/slots/:id - 获取单个时段
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TimeSlot>> {
    let slot = time_slot::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", id)))?;
    Ok(Json(slot))
}
