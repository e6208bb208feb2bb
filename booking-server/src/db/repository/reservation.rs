//! Reservation Repository
//!
//! Reads are pool-level; writes that touch both the reservation row and its
//! table assignments run in a transaction. The partial unique index on
//! `reservation_table (table_id, date, slot_id) WHERE is_active = 1` is the
//! last line of defense against double-booking: even if two writers pass the
//! in-transaction re-check, only one commit can win.

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus, ReservationUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str = "SELECT id, code, area_id, date, slot_id, guest_count, status, contact_name, contact_phone, contact_email, notes, payment_status, pre_order_items, pre_order_subtotal, pre_order_total, created_at, updated_at FROM reservation";

/// Load the active table assignments for a batch of reservations.
async fn attach_table_ids(pool: &SqlitePool, reservations: &mut [Reservation]) -> RepoResult<()> {
    if reservations.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = reservations.iter().map(|r| r.id).collect();
    let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    let sql = format!(
        "SELECT reservation_id, table_id FROM reservation_table WHERE is_active = 1 AND reservation_id IN ({placeholders}) ORDER BY table_id"
    );
    let mut query = sqlx::query_as::<_, (i64, i64)>(&sql);
    for id in &ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;

    for reservation in reservations.iter_mut() {
        reservation.table_ids = rows
            .iter()
            .filter(|(rid, _)| *rid == reservation.id)
            .map(|(_, tid)| *tid)
            .collect();
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let reservation = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match reservation {
        Some(r) => {
            let mut batch = [r];
            attach_table_ids(pool, &mut batch).await?;
            let [r] = batch;
            Ok(Some(r))
        }
        None => Ok(None),
    }
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE code = ? LIMIT 1");
    let id = sqlx::query_as::<_, Reservation>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?
        .map(|r| r.id);
    match id {
        Some(id) => find_by_id(pool, id).await,
        None => Ok(None),
    }
}

/// List reservations with optional filters, newest service first.
pub async fn find_all(
    pool: &SqlitePool,
    date: Option<&str>,
    status: Option<ReservationStatus>,
    area_id: Option<i64>,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<Reservation>> {
    let sql = format!(
        "{RESERVATION_SELECT} WHERE (?1 IS NULL OR date = ?1) AND (?2 IS NULL OR status = ?2) AND (?3 IS NULL OR area_id = ?3) ORDER BY date DESC, slot_id, created_at LIMIT ?4 OFFSET ?5"
    );
    let mut reservations = sqlx::query_as::<_, Reservation>(&sql)
        .bind(date)
        .bind(status)
        .bind(area_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    attach_table_ids(pool, &mut reservations).await?;
    Ok(reservations)
}

/// Table ids already held for a service window.
pub async fn occupied_table_ids(
    pool: &SqlitePool,
    date: &str,
    slot_id: i64,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT table_id FROM reservation_table WHERE date = ? AND slot_id = ? AND is_active = 1",
    )
    .bind(date)
    .bind(slot_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Insert a reservation together with its table assignments.
///
/// The chosen tables are re-checked inside the transaction; a concurrent
/// booking that claimed one of them since the caller's availability read
/// surfaces as [`RepoError::Conflict`].
pub async fn create(pool: &SqlitePool, res: &Reservation) -> RepoResult<Reservation> {
    if res.table_ids.is_empty() {
        return Err(RepoError::Validation(
            "Reservation must hold at least one table".into(),
        ));
    }
    let items_json = serde_json::to_string(&res.pre_order_items)
        .map_err(|e| RepoError::Validation(format!("Invalid pre-order items: {e}")))?;

    let mut tx = pool.begin().await?;

    let placeholders = res
        .table_ids
        .iter()
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ");
    let check_sql = format!(
        "SELECT COUNT(*) FROM reservation_table WHERE date = ? AND slot_id = ? AND is_active = 1 AND table_id IN ({placeholders})"
    );
    let mut check = sqlx::query_scalar::<_, i64>(&check_sql)
        .bind(&res.date)
        .bind(res.slot_id);
    for table_id in &res.table_ids {
        check = check.bind(table_id);
    }
    let held = check.fetch_one(&mut *tx).await?;
    if held > 0 {
        return Err(RepoError::Conflict(
            "One or more tables were just booked".into(),
        ));
    }

    sqlx::query(
        "INSERT INTO reservation (id, code, area_id, date, slot_id, guest_count, status, contact_name, contact_phone, contact_email, notes, payment_status, pre_order_items, pre_order_subtotal, pre_order_total, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(res.id)
    .bind(&res.code)
    .bind(res.area_id)
    .bind(&res.date)
    .bind(res.slot_id)
    .bind(res.guest_count)
    .bind(res.status)
    .bind(&res.contact_name)
    .bind(&res.contact_phone)
    .bind(&res.contact_email)
    .bind(&res.notes)
    .bind(res.payment_status)
    .bind(&items_json)
    .bind(res.pre_order_subtotal)
    .bind(res.pre_order_total)
    .bind(res.created_at)
    .bind(res.updated_at)
    .execute(&mut *tx)
    .await?;

    for table_id in &res.table_ids {
        sqlx::query(
            "INSERT INTO reservation_table (id, reservation_id, table_id, date, slot_id, is_active) VALUES (?, ?, ?, ?, ?, 1)",
        )
        .bind(snowflake_id())
        .bind(res.id)
        .bind(table_id)
        .bind(&res.date)
        .bind(res.slot_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, res.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Update details in one statement. Capacity and status rules are checked
/// by the caller; `priced` carries a server-priced replacement pre-order as
/// `(items_json, subtotal, total)`.
pub async fn update_details(
    pool: &SqlitePool,
    id: i64,
    data: &ReservationUpdate,
    priced: Option<(String, i64, i64)>,
    now: i64,
) -> RepoResult<()> {
    let (items_json, subtotal, total) = match priced {
        Some((j, s, t)) => (Some(j), Some(s), Some(t)),
        None => (None, None, None),
    };

    let rows = sqlx::query(
        "UPDATE reservation SET guest_count = COALESCE(?1, guest_count), contact_name = COALESCE(?2, contact_name), contact_phone = COALESCE(?3, contact_phone), contact_email = COALESCE(?4, contact_email), notes = COALESCE(?5, notes), payment_status = COALESCE(?6, payment_status), pre_order_items = COALESCE(?7, pre_order_items), pre_order_subtotal = COALESCE(?8, pre_order_subtotal), pre_order_total = COALESCE(?9, pre_order_total), updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.guest_count)
    .bind(&data.contact_name)
    .bind(&data.contact_phone)
    .bind(&data.contact_email)
    .bind(&data.notes)
    .bind(data.payment_status)
    .bind(items_json)
    .bind(subtotal)
    .bind(total)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(())
}

/// Optimistic status transition: only applies while the row is still in
/// `from`. Zero rows affected means a concurrent writer got there first.
pub async fn transition(
    pool: &SqlitePool,
    id: i64,
    from: ReservationStatus,
    to: ReservationStatus,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE reservation SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Reservation {id} changed state, expected {from}"
        )));
    }
    Ok(())
}

/// Cancel and release the held tables in one transaction.
pub async fn cancel(
    pool: &SqlitePool,
    id: i64,
    from: ReservationStatus,
    now: i64,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE reservation SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(ReservationStatus::Cancelled)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Reservation {id} changed state, expected {from}"
        )));
    }

    sqlx::query("UPDATE reservation_table SET is_active = 0 WHERE reservation_id = ? AND is_active = 1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
