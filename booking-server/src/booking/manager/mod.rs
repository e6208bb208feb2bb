//! BookingManager - reservation lifecycle orchestration
//!
//! Single entry point for everything that creates or mutates a reservation.
//! Handlers stay thin; the rules live here and in the sibling modules.
//!
//! # Booking Flow
//!
//! ```text
//! create(input, tables)                auto_create(input)
//!     │                                    │
//!     │                                    ├─ resolve availability
//!     │                                    ├─ auto-select a combination
//!     │                                    │  (retry once on a lost race)
//!     │                                    ▼
//!     ├─ 1. Check party size and booking window
//!     ├─ 2. Check the tables: active, in the area, enough seats
//!     ├─ 3. Price the pre-order against the live menu
//!     ├─ 4. Insert reservation + assignments (transactional re-check)
//!     └─ 5. Return the stored reservation (status: pending)
//! ```
//!
//! Status moves through `pending → confirmed → seated → completed`, with
//! cancellation allowed from `pending`/`confirmed`. Cancelling releases the
//! table assignments; completing keeps them as service history.

mod error;
pub use error::*;

use chrono::Utc;
use chrono_tz::Tz;
use sqlx::SqlitePool;
use tracing::{info, warn};

use shared::models::{
    DiningTable, PaymentStatus, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate, TimeSlot,
};
use shared::util::{confirmation_code, now_millis, snowflake_id};

use super::availability::{self, Availability};
use super::combinations::{self, SelectionStrategy};
use super::preorder::{self, PricedPreOrder};
use crate::db::repository::{RepoError, area, dining_table, menu_item, reservation, time_slot};

/// Knobs governing booking decisions
#[derive(Debug, Clone)]
pub struct BookingPolicy {
    /// Restaurant-local timezone for window math
    pub timezone: Tz,
    /// Opening hour of the built-in hourly slot fallback
    pub open_hour: u32,
    /// Closing hour of the built-in hourly slot fallback
    pub close_hour: u32,
    /// Minimum minutes between "now" and the slot start
    pub min_lead_minutes: i64,
    /// Parties at or above this size must contact the restaurant
    pub max_party_size: i32,
    /// Upper bound on tables joined for one reservation
    pub max_tables: usize,
    pub strategy: SelectionStrategy,
    /// Percentage off the pre-order subtotal
    pub pre_order_discount_percent: u32,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Madrid,
            open_hour: 6,
            close_hour: 22,
            min_lead_minutes: 60,
            max_party_size: 23,
            max_tables: 3,
            strategy: SelectionStrategy::FirstFit,
            pre_order_discount_percent: 15,
        }
    }
}

/// Reservation lifecycle manager
pub struct BookingManager {
    pool: SqlitePool,
    policy: BookingPolicy,
}

impl BookingManager {
    pub fn new(pool: SqlitePool, policy: BookingPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    // ========== Availability ==========

    /// Free tables and viable seatings for one area, date and slot
    pub async fn find_available_tables(
        &self,
        area_id: i64,
        date: &str,
        slot_id: i64,
        guest_count: i32,
    ) -> BookingResult<Availability> {
        availability::resolve(&self.pool, &self.policy, area_id, date, slot_id, guest_count).await
    }

    /// Bookable slots; falls back to the built-in hourly set when the slot
    /// table has never been seeded
    pub async fn list_slots(&self) -> BookingResult<Vec<TimeSlot>> {
        let slots = time_slot::find_all(&self.pool).await?;
        if slots.is_empty() {
            return Ok(TimeSlot::default_set(
                self.policy.open_hour,
                self.policy.close_hour,
            ));
        }
        Ok(slots)
    }

    // ========== Create ==========

    /// Book the given tables for the party.
    ///
    /// The caller picked the combination; this validates it, prices the
    /// pre-order and inserts. A concurrent booking that grabbed one of the
    /// tables first surfaces as [`BookingError::ConcurrencyConflict`].
    pub async fn create(
        &self,
        input: &ReservationCreate,
        table_ids: &[i64],
    ) -> BookingResult<Reservation> {
        availability::check_party_size(&self.policy, input.guest_count)?;
        if area::find_by_id(&self.pool, input.area_id)
            .await?
            .filter(|a| a.is_active)
            .is_none()
        {
            return Err(BookingError::NotFound(format!(
                "Area not found: {}",
                input.area_id
            )));
        }
        self.check_window(input).await?;

        let tables = self.load_tables_for_booking(input.area_id, table_ids).await?;
        self.check_seating_capacity(&tables, input.guest_count)?;

        let priced = self.price_items(&input.pre_order_items).await?;
        let draft = self.build_reservation(input, table_ids, priced);

        match reservation::create(&self.pool, &draft).await {
            Ok(created) => {
                info!(
                    id = created.id,
                    code = %created.code,
                    date = %created.date,
                    slot_id = created.slot_id,
                    guest_count = created.guest_count,
                    "Reservation created"
                );
                Ok(created)
            }
            Err(RepoError::Conflict(msg)) => Err(BookingError::ConcurrencyConflict(msg)),
            Err(e) => Err(e.into()),
        }
    }

    /// Book with a server-selected table combination.
    ///
    /// Re-resolves and retries once when a concurrent booking wins the race
    /// for the selected tables.
    pub async fn auto_create(&self, input: &ReservationCreate) -> BookingResult<Reservation> {
        match self.try_auto_create(input).await {
            Err(BookingError::ConcurrencyConflict(_)) => {
                warn!(
                    date = %input.date,
                    slot_id = input.slot_id,
                    "Selected tables were taken concurrently, retrying"
                );
                self.try_auto_create(input).await
            }
            other => other,
        }
    }

    async fn try_auto_create(&self, input: &ReservationCreate) -> BookingResult<Reservation> {
        let availability = self
            .find_available_tables(input.area_id, &input.date, input.slot_id, input.guest_count)
            .await?;

        let selected = combinations::auto_select(
            &availability.tables,
            input.guest_count,
            self.policy.strategy,
        );
        let Some(selected) = selected else {
            // Distinguish "slot taken" from "this area can never seat them"
            let all_tables =
                dining_table::find_active_by_area(&self.pool, input.area_id).await?;
            if combinations::auto_select(&all_tables, input.guest_count, self.policy.strategy)
                .is_some()
            {
                return Err(BookingError::NoAvailability(format!(
                    "No free tables for {} guests on {} (slot {})",
                    input.guest_count, input.date, input.slot_id
                )));
            }
            return Err(BookingError::CapacityExceeded(format!(
                "No table combination in this area seats {} guests",
                input.guest_count
            )));
        };

        let table_ids: Vec<i64> = selected.iter().map(|t| t.id).collect();
        self.create(input, &table_ids).await
    }

    // ========== Read ==========

    pub async fn get(&self, id: i64) -> BookingResult<Reservation> {
        reservation::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation not found: {id}")))
    }

    pub async fn find_by_code(&self, code: &str) -> BookingResult<Reservation> {
        reservation::find_by_code(&self.pool, code)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation not found: {code}")))
    }

    pub async fn list(
        &self,
        date: Option<&str>,
        status: Option<ReservationStatus>,
        area_id: Option<i64>,
        limit: i32,
        offset: i32,
    ) -> BookingResult<Vec<Reservation>> {
        Ok(reservation::find_all(&self.pool, date, status, area_id, limit, offset).await?)
    }

    // ========== Update ==========

    /// Edit contact details, notes, party size, payment status or the
    /// pre-order. Allowed while the reservation is pending or confirmed.
    pub async fn update_details(
        &self,
        id: i64,
        update: &ReservationUpdate,
    ) -> BookingResult<Reservation> {
        let current = self.get(id).await?;
        if !matches!(
            current.status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        ) {
            return Err(BookingError::InvalidOperation(format!(
                "Reservation in status '{}' can no longer be edited",
                current.status
            )));
        }

        if let Some(guest_count) = update.guest_count {
            availability::check_party_size(&self.policy, guest_count)?;
            let tables = self.held_tables(&current).await?;
            self.check_seating_capacity(&tables, guest_count)?;
        }

        let priced = match &update.pre_order_items {
            Some(items) => {
                let priced = self.price_items(items).await?;
                let json = serde_json::to_string(&priced.items).map_err(|e| {
                    BookingError::Internal(format!("Failed to encode pre-order: {e}"))
                })?;
                Some((json, priced.subtotal, priced.total))
            }
            None => None,
        };

        reservation::update_details(&self.pool, id, update, priced, now_millis()).await?;
        self.get(id).await
    }

    // ========== Lifecycle ==========

    /// Staff-driven status change. Confirming re-checks that the held
    /// tables still seat the party; cancelling releases the tables.
    pub async fn transition(
        &self,
        id: i64,
        to: ReservationStatus,
    ) -> BookingResult<Reservation> {
        let current = self.get(id).await?;
        let from = current.status;
        if !from.can_transition_to(to) {
            return Err(BookingError::InvalidTransition { from, to });
        }

        if to == ReservationStatus::Confirmed {
            let tables = self.held_tables(&current).await?;
            self.check_seating_capacity(&tables, current.guest_count)?;
        }

        let result = if to == ReservationStatus::Cancelled {
            reservation::cancel(&self.pool, id, from, now_millis()).await
        } else {
            reservation::transition(&self.pool, id, from, to, now_millis()).await
        };
        match result {
            Ok(()) => {}
            Err(RepoError::Conflict(msg)) => return Err(BookingError::ConcurrencyConflict(msg)),
            Err(e) => return Err(e.into()),
        }

        info!(id, %from, %to, "Reservation status changed");
        self.get(id).await
    }

    /// Customer-side cancellation. Only a pending reservation can be
    /// cancelled directly; anything later goes through the restaurant.
    pub async fn cancel_by_customer(&self, id: i64) -> BookingResult<Reservation> {
        let current = self.get(id).await?;
        if current.status != ReservationStatus::Pending {
            return Err(BookingError::InvalidOperation(format!(
                "Reservation in status '{}' must be cancelled by the restaurant",
                current.status
            )));
        }

        match reservation::cancel(&self.pool, id, ReservationStatus::Pending, now_millis()).await
        {
            Ok(()) => {}
            Err(RepoError::Conflict(msg)) => return Err(BookingError::ConcurrencyConflict(msg)),
            Err(e) => return Err(e.into()),
        }

        info!(id, "Reservation cancelled by customer");
        self.get(id).await
    }

    // ========== Internals ==========

    async fn check_window(&self, input: &ReservationCreate) -> BookingResult<()> {
        let slot = availability::resolve_slot(&self.pool, &self.policy, input.slot_id).await?;
        let date = availability::parse_booking_date(&input.date)?;
        let start = availability::slot_start_time(&slot)?;
        availability::validate_window(
            date,
            start,
            self.policy.timezone,
            self.policy.min_lead_minutes,
            Utc::now(),
        )
    }

    /// The tables must exist, be active, belong to the area, and stay
    /// within the per-reservation limit
    async fn load_tables_for_booking(
        &self,
        area_id: i64,
        table_ids: &[i64],
    ) -> BookingResult<Vec<DiningTable>> {
        if table_ids.is_empty() {
            return Err(BookingError::Validation(
                "At least one table is required".into(),
            ));
        }
        if table_ids.len() > self.policy.max_tables {
            return Err(BookingError::Validation(format!(
                "A reservation joins at most {} tables",
                self.policy.max_tables
            )));
        }

        let mut tables = Vec::with_capacity(table_ids.len());
        for table_id in table_ids {
            if tables.iter().any(|t: &DiningTable| t.id == *table_id) {
                return Err(BookingError::Validation(format!(
                    "Duplicate table in selection: {table_id}"
                )));
            }
            let table = dining_table::find_by_id(&self.pool, *table_id)
                .await?
                .ok_or_else(|| BookingError::NotFound(format!("Table not found: {table_id}")))?;
            if !table.is_active {
                return Err(BookingError::Validation(format!(
                    "Table is not bookable: {}",
                    table.name
                )));
            }
            if table.area_id != area_id {
                return Err(BookingError::Validation(format!(
                    "Table {} belongs to another area",
                    table.name
                )));
            }
            tables.push(table);
        }
        Ok(tables)
    }

    fn check_seating_capacity(
        &self,
        tables: &[DiningTable],
        guest_count: i32,
    ) -> BookingResult<()> {
        let seats: i32 = tables.iter().map(|t| t.capacity).sum();
        if seats < guest_count {
            return Err(BookingError::CapacityExceeded(format!(
                "Selected tables seat {seats}, party of {guest_count} does not fit"
            )));
        }
        Ok(())
    }

    /// Tables currently assigned to the reservation. Deactivated tables
    /// still count; the guests are already sitting at them.
    async fn held_tables(&self, current: &Reservation) -> BookingResult<Vec<DiningTable>> {
        let mut tables = Vec::with_capacity(current.table_ids.len());
        for table_id in &current.table_ids {
            if let Some(table) = dining_table::find_by_id(&self.pool, *table_id).await? {
                tables.push(table);
            }
        }
        Ok(tables)
    }

    async fn price_items(
        &self,
        items: &[shared::models::PreOrderItemInput],
    ) -> BookingResult<PricedPreOrder> {
        if items.is_empty() {
            return Ok(PricedPreOrder::default());
        }
        let ids: Vec<i64> = items.iter().map(|i| i.menu_item_id).collect();
        let menu = match menu_item::find_active_by_ids(&self.pool, &ids).await {
            Ok(menu) => menu,
            // An unknown or retired dish is a payload problem, not a 404
            Err(RepoError::NotFound(msg)) => return Err(BookingError::Validation(msg)),
            Err(e) => return Err(e.into()),
        };
        preorder::price_pre_order(items, &menu, self.policy.pre_order_discount_percent)
    }

    fn build_reservation(
        &self,
        input: &ReservationCreate,
        table_ids: &[i64],
        priced: PricedPreOrder,
    ) -> Reservation {
        let id = snowflake_id();
        let now = now_millis();
        Reservation {
            id,
            code: confirmation_code(id),
            area_id: input.area_id,
            date: input.date.clone(),
            slot_id: input.slot_id,
            guest_count: input.guest_count,
            status: ReservationStatus::Pending,
            contact_name: input.contact_name.trim().to_string(),
            contact_phone: input.contact_phone.trim().to_string(),
            contact_email: input
                .contact_email
                .as_ref()
                .map(|e| e.trim().to_string()),
            notes: input.notes.clone(),
            payment_status: PaymentStatus::Unpaid,
            pre_order_items: priced.items,
            pre_order_subtotal: priced.subtotal,
            pre_order_total: priced.total,
            created_at: now,
            updated_at: now,
            table_ids: table_ids.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests;
