//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const TABLE_SELECT: &str = "SELECT id, area_id, name, capacity, is_active FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE is_active = 1 ORDER BY area_id, name");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

/// Active tables of an area, ordered by capacity then id so assignment
/// scans are deterministic.
pub async fn find_active_by_area(pool: &SqlitePool, area_id: i64) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE area_id = ? AND is_active = 1 ORDER BY capacity, id");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(area_id)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

async fn find_by_area_and_name(
    pool: &SqlitePool,
    area_id: i64,
    name: &str,
) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE area_id = ? AND name = ? LIMIT 1");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(area_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if data.capacity <= 0 {
        return Err(RepoError::Validation(format!(
            "Table capacity must be positive, got {}",
            data.capacity
        )));
    }
    if find_by_area_and_name(pool, data.area_id, &data.name)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists in this area",
            data.name
        )));
    }

    let id = snowflake_id();
    sqlx::query("INSERT INTO dining_table (id, area_id, name, capacity) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(data.area_id)
        .bind(&data.name)
        .bind(data.capacity)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    if let Some(capacity) = data.capacity
        && capacity <= 0
    {
        return Err(RepoError::Validation(format!(
            "Table capacity must be positive, got {capacity}"
        )));
    }

    let rows = sqlx::query(
        "UPDATE dining_table SET area_id = COALESCE(?1, area_id), name = COALESCE(?2, name), capacity = COALESCE(?3, capacity), is_active = COALESCE(?4, is_active) WHERE id = ?5",
    )
    .bind(data.area_id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

/// Soft delete. Existing reservations keep their assignment history;
/// the table simply stops being offered for new bookings.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dining_table SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
