//! Availability resolution
//!
//! Answers "which tables in this area are free for this date and slot, and
//! how could they seat this party?". A table is free when it is active and
//! no live assignment references it for the window. Cancelled reservations
//! release their assignments, so their tables show up here again.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{DiningTable, TimeSlot};
use sqlx::SqlitePool;

use super::combinations::{self, TableCombinations};
use super::manager::{BookingError, BookingPolicy, BookingResult};
use crate::db::repository::{area, dining_table, reservation, time_slot};
use crate::utils::time::date_time_to_millis;

/// Free tables for a window, plus every viable seating for the party
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub tables: Vec<DiningTable>,
    pub combinations: TableCombinations,
}

/// Resolve availability for one area, date and slot.
///
/// Validates the party size and booking window, then filters the area's
/// active tables down to those without a live assignment and enumerates
/// the seatings that cover the party.
pub async fn resolve(
    pool: &SqlitePool,
    policy: &BookingPolicy,
    area_id: i64,
    date: &str,
    slot_id: i64,
    guest_count: i32,
) -> BookingResult<Availability> {
    check_party_size(policy, guest_count)?;

    if area::find_by_id(pool, area_id)
        .await?
        .filter(|a| a.is_active)
        .is_none()
    {
        return Err(BookingError::NotFound(format!(
            "Area not found: {}",
            area_id
        )));
    }

    let slot = resolve_slot(pool, policy, slot_id).await?;
    let booking_date = parse_booking_date(date)?;
    let start = slot_start_time(&slot)?;
    validate_window(
        booking_date,
        start,
        policy.timezone,
        policy.min_lead_minutes,
        Utc::now(),
    )?;

    let tables = free_tables(pool, area_id, date, slot_id).await?;
    let combinations = combinations::select_combinations(&tables, guest_count);

    Ok(Availability {
        tables,
        combinations,
    })
}

/// Active tables of the area minus those held for the window, in capacity
/// order so the combination scan is deterministic
pub(crate) async fn free_tables(
    pool: &SqlitePool,
    area_id: i64,
    date: &str,
    slot_id: i64,
) -> BookingResult<Vec<DiningTable>> {
    let tables = dining_table::find_active_by_area(pool, area_id).await?;
    let occupied = reservation::occupied_table_ids(pool, date, slot_id).await?;
    Ok(tables
        .into_iter()
        .filter(|t| !occupied.contains(&t.id))
        .collect())
}

/// Party must be at least one guest and below the online booking ceiling
pub(crate) fn check_party_size(policy: &BookingPolicy, guest_count: i32) -> BookingResult<()> {
    if guest_count < 1 {
        return Err(BookingError::Validation(format!(
            "guest_count must be positive, got {}",
            guest_count
        )));
    }
    if guest_count >= policy.max_party_size {
        return Err(BookingError::CapacityExceeded(format!(
            "Parties of {} or more must contact the restaurant directly",
            policy.max_party_size
        )));
    }
    Ok(())
}

/// Look up the slot, falling back to the built-in hourly set when the slot
/// table has never been seeded
pub(crate) async fn resolve_slot(
    pool: &SqlitePool,
    policy: &BookingPolicy,
    slot_id: i64,
) -> BookingResult<TimeSlot> {
    if let Some(slot) = time_slot::find_by_id(pool, slot_id).await? {
        if !slot.is_active {
            return Err(BookingError::Validation(format!(
                "Time slot is not bookable: {}",
                slot_id
            )));
        }
        return Ok(slot);
    }

    if time_slot::find_all(pool).await?.is_empty()
        && let Some(slot) = TimeSlot::default_set(policy.open_hour, policy.close_hour)
            .into_iter()
            .find(|s| s.id == slot_id)
    {
        return Ok(slot);
    }

    Err(BookingError::NotFound(format!(
        "Time slot not found: {}",
        slot_id
    )))
}

/// The booking window is valid when the date is not in the past and the
/// slot starts at least `min_lead_minutes` after `now_utc`. A lead of
/// exactly `min_lead_minutes` is allowed.
pub(crate) fn validate_window(
    date: NaiveDate,
    slot_start: NaiveTime,
    tz: Tz,
    min_lead_minutes: i64,
    now_utc: DateTime<Utc>,
) -> BookingResult<()> {
    let today = now_utc.with_timezone(&tz).date_naive();
    if date < today {
        return Err(BookingError::InvalidTimeWindow(format!(
            "Date {} is in the past (today is {})",
            date, today
        )));
    }

    let start_millis = date_time_to_millis(date, slot_start, tz);
    let lead_millis = start_millis - now_utc.timestamp_millis();
    if lead_millis < min_lead_minutes * 60_000 {
        return Err(BookingError::InvalidTimeWindow(format!(
            "Slot at {} {} starts within the {}-minute booking lead",
            date,
            slot_start.format("%H:%M"),
            min_lead_minutes
        )));
    }
    Ok(())
}

pub(crate) fn parse_booking_date(date: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| BookingError::Validation(format!("Invalid date format: {}", date)))
}

/// Slot times are stored as "HH:MM"; a row that fails to parse is corrupt
pub(crate) fn slot_start_time(slot: &TimeSlot) -> BookingResult<NaiveTime> {
    NaiveTime::parse_from_str(&slot.start_time, "%H:%M").map_err(|_| {
        BookingError::Internal(format!(
            "Malformed start_time '{}' on slot {}",
            slot.start_time, slot.id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Madrid;

    fn policy() -> BookingPolicy {
        BookingPolicy::default()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_past_date_is_rejected() {
        let now = utc(2025, 6, 15, 12, 0);
        let err = validate_window(date(2025, 6, 14), hm(13, 0), chrono_tz::UTC, 60, now)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimeWindow(_)));
    }

    #[test]
    fn test_slot_within_lead_is_rejected() {
        let now = utc(2025, 6, 15, 12, 0);
        // 12:30 is only 30 minutes out
        let err = validate_window(date(2025, 6, 15), hm(12, 30), chrono_tz::UTC, 60, now)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimeWindow(_)));
    }

    #[test]
    fn test_lead_boundary_is_allowed() {
        let now = utc(2025, 6, 15, 12, 0);
        // Exactly 60 minutes out
        assert!(validate_window(date(2025, 6, 15), hm(13, 0), chrono_tz::UTC, 60, now).is_ok());
    }

    #[test]
    fn test_future_date_passes() {
        let now = utc(2025, 6, 15, 12, 0);
        assert!(validate_window(date(2025, 6, 16), hm(6, 0), chrono_tz::UTC, 60, now).is_ok());
    }

    #[test]
    fn test_lead_respects_business_timezone() {
        // Madrid is UTC+1 in January. Local 13:00 on the 15th is 12:00 UTC,
        // 30 minutes after now.
        let now = utc(2025, 1, 15, 11, 30);
        let err = validate_window(date(2025, 1, 15), hm(13, 0), Madrid, 60, now).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTimeWindow(_)));

        // 14:00 local is 90 minutes out
        assert!(validate_window(date(2025, 1, 15), hm(14, 0), Madrid, 60, now).is_ok());
    }

    #[test]
    fn test_party_size_bounds() {
        let policy = policy();

        assert!(check_party_size(&policy, 1).is_ok());
        assert!(check_party_size(&policy, 22).is_ok());

        let err = check_party_size(&policy, 23).unwrap_err();
        assert!(matches!(err, BookingError::CapacityExceeded(_)));

        let err = check_party_size(&policy, 0).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_malformed_stored_slot_time() {
        let slot = TimeSlot {
            id: 3,
            name: "bad".to_string(),
            start_time: "noon".to_string(),
            end_time: "13:00".to_string(),
            is_active: true,
        };
        assert!(matches!(
            slot_start_time(&slot).unwrap_err(),
            BookingError::Internal(_)
        ));
    }

    #[test]
    fn test_booking_date_format() {
        assert!(parse_booking_date("2025-06-15").is_ok());
        assert!(parse_booking_date("15/06/2025").is_err());
        assert!(parse_booking_date("junio 15").is_err());
    }
}
