//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::models::DiningTable;

use crate::booking::combinations::{self, SelectionStrategy, TableCombinations};
use crate::core::ServerState;
use crate::utils::AppResult;

/// Query params for an availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub area_id: i64,
    /// Booking date, YYYY-MM-DD
    pub date: String,
    pub slot_id: i64,
    pub guest_count: i32,
    /// Optional override of the configured selection strategy
    #[serde(default)]
    pub strategy: Option<SelectionStrategy>,
}

/// Availability for one area, date and slot
#[derive(Debug, serde::Serialize)]
pub struct AvailabilityResponse {
    /// Tables free for the requested window
    pub tables: Vec<DiningTable>,
    /// All seatings of up to three tables that cover the party
    pub combinations: TableCombinations,
    /// The combination auto-booking would pick, if any
    pub auto: Option<Vec<DiningTable>>,
}

/// GET /api/availability - 查询空桌和可行的拼桌方案
pub async fn check(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let availability = state
        .booking
        .find_available_tables(query.area_id, &query.date, query.slot_id, query.guest_count)
        .await?;

    let strategy = query.strategy.unwrap_or(state.booking.policy().strategy);
    let auto = combinations::auto_select(&availability.tables, query.guest_count, strategy)
        .map(|tables| tables.into_iter().cloned().collect());

    Ok(Json(AvailabilityResponse {
        tables: availability.tables,
        combinations: availability.combinations,
        auto,
    }))
}
