//! Area Repository

use super::{RepoError, RepoResult};
use shared::models::{Area, AreaCreate, AreaUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Area>> {
    let areas = sqlx::query_as::<_, Area>(
        "SELECT id, name, description, is_active FROM area WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(areas)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Area>> {
    let area =
        sqlx::query_as::<_, Area>("SELECT id, name, description, is_active FROM area WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(area)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Area>> {
    let area = sqlx::query_as::<_, Area>(
        "SELECT id, name, description, is_active FROM area WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(area)
}

pub async fn create(pool: &SqlitePool, data: AreaCreate) -> RepoResult<Area> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Area '{}' already exists",
            data.name
        )));
    }

    let id = snowflake_id();
    sqlx::query("INSERT INTO area (id, name, description) VALUES (?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create area".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: AreaUpdate) -> RepoResult<Area> {
    let rows = sqlx::query(
        "UPDATE area SET name = COALESCE(?1, name), description = COALESCE(?2, description), is_active = COALESCE(?3, is_active) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Area {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Area {id} not found")))
}

/// Soft delete. Refused while the area still has active tables.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dining_table WHERE area_id = ? AND is_active = 1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete area with active tables".into(),
        ));
    }
    let rows = sqlx::query("UPDATE area SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
