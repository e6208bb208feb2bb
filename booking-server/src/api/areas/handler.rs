//! Area API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Area, AreaCreate, AreaUpdate, DiningTable};

use crate::core::ServerState;
use crate::db::repository::{area, dining_table};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/areas - 获取所有区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Area>>> {
    let areas = area::find_all(state.pool()).await?;
    Ok(Json(areas))
}

/// GET /api/areas/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Area>> {
    let found = area::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Area {} not found", id)))?;
    Ok(Json(found))
}

/// POST /api/areas - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AreaCreate>,
) -> AppResult<Json<Area>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created = area::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/areas/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AreaUpdate>,
) -> AppResult<Json<Area>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let updated = area::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/areas/:id - 删除区域 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = area::delete(state.pool(), id).await?;
    Ok(Json(result))
}

/// GET /api/areas/:id/tables - 获取区域内的可用桌台
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_active_by_area(state.pool(), id).await?;
    Ok(Json(tables))
}
