//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::core::ServerState;
use crate::db::repository::{area, dining_table};
use crate::utils::validation::{MAX_NAME_LEN, validate_positive, validate_required_text};
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.pool()).await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_positive(payload.capacity, "capacity")?;
    ensure_area_exists(&state, payload.area_id).await?;

    let created = dining_table::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_positive(capacity, "capacity")?;
    }
    if let Some(area_id) = payload.area_id {
        ensure_area_exists(&state, area_id).await?;
    }

    let updated = dining_table::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/tables/:id - 删除桌台 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = dining_table::delete(state.pool(), id).await?;
    Ok(Json(result))
}

/// 桌台必须挂在已启用的区域下
async fn ensure_area_exists(state: &ServerState, area_id: i64) -> AppResult<()> {
    area::find_by_id(state.pool(), area_id)
        .await?
        .filter(|a| a.is_active)
        .ok_or_else(|| AppError::not_found(format!("Area {} not found", area_id)))?;
    Ok(())
}
