//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/menu-items - 获取所有菜品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_all(state.pool()).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    if payload.price < 0 {
        return Err(AppError::validation("price must not be negative"));
    }

    let created = menu_item::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/menu-items/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    if let Some(price) = payload.price
        && price < 0
    {
        return Err(AppError::validation("price must not be negative"));
    }

    let updated = menu_item::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu-items/:id - 删除菜品 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = menu_item::delete(state.pool(), id).await?;
    Ok(Json(result))
}
