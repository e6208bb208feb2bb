//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, name, price, category, is_active FROM menu_item";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE is_active = 1 ORDER BY category, name");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Fetch the active items named by a pre-order, preserving request order.
/// Unknown or inactive ids come back as an error so the caller can reject
/// the whole pre-order.
pub async fn find_active_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<MenuItem>> {
    let mut items = Vec::with_capacity(ids.len());
    for id in ids {
        let item = find_by_id(pool, *id)
            .await?
            .filter(|i| i.is_active)
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;
        items.push(item);
    }
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    if data.price < 0 {
        return Err(RepoError::Validation(format!(
            "Price must be non-negative, got {}",
            data.price
        )));
    }

    let id = snowflake_id();
    sqlx::query("INSERT INTO menu_item (id, name, price, category) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(data.price)
        .bind(&data.category)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(price) = data.price
        && price < 0
    {
        return Err(RepoError::Validation(format!(
            "Price must be non-negative, got {price}"
        )));
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), price = COALESCE(?2, price), category = COALESCE(?3, category), is_active = COALESCE(?4, is_active) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Soft delete. Reservations keep their price/name snapshots.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE menu_item SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
