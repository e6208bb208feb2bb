//! Time Slot Repository
//!
//! Slots are fixed reference data. They are seeded once from the configured
//! opening hours and only read afterwards; there is no mutation API.

use super::{RepoError, RepoResult};
use shared::models::TimeSlot;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<TimeSlot>> {
    let slots = sqlx::query_as::<_, TimeSlot>(
        "SELECT id, name, start_time, end_time, is_active FROM time_slot WHERE is_active = 1 ORDER BY start_time",
    )
    .fetch_all(pool)
    .await?;
    Ok(slots)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TimeSlot>> {
    let slot = sqlx::query_as::<_, TimeSlot>(
        "SELECT id, name, start_time, end_time, is_active FROM time_slot WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(slot)
}

/// Seed the default slot set when the table is empty. Idempotent: a
/// restart with an already-populated table changes nothing.
pub async fn ensure_defaults(pool: &SqlitePool, open_hour: u32, close_hour: u32) -> RepoResult<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM time_slot")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(0);
    }
    if close_hour <= open_hour {
        return Err(RepoError::Validation(format!(
            "Invalid opening hours: {open_hour}..{close_hour}"
        )));
    }

    let slots = TimeSlot::default_set(open_hour, close_hour);
    let mut inserted = 0;
    for slot in &slots {
        sqlx::query(
            "INSERT INTO time_slot (id, name, start_time, end_time, is_active) VALUES (?, ?, ?, ?, 1)",
        )
        .bind(slot.id)
        .bind(&slot.name)
        .bind(&slot.start_time)
        .bind(&slot.end_time)
        .execute(pool)
        .await?;
        inserted += 1;
    }
    tracing::info!(slots = inserted, "Seeded default time slots");
    Ok(inserted)
}
