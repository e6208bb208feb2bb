//! Reservation API Handlers
//!
//! Shape checks (lengths, phone/email) happen here; booking rules
//! (windows, capacity, lifecycle) live in the manager.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{
    Reservation, ReservationCreate, ReservationStatus, ReservationStatusUpdate, ReservationUpdate,
};

use crate::core::ServerState;
use crate::utils::time::parse_date;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text, validate_phone,
    validate_required_text,
};
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};

/// Create payload with an explicit table selection
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(flatten)]
    pub reservation: ReservationCreate,
    /// Tables to book; at most the configured join limit
    #[serde(default)]
    pub table_ids: Vec<i64>,
}

/// Query params for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by booking date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Filter by lifecycle status
    pub status: Option<ReservationStatus>,
    /// Filter by area
    pub area_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/reservations - 获取预订列表 (分页 + 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    if let Some(date) = &query.date {
        parse_date(date)?;
    }
    let reservations = state
        .booking
        .list(
            query.date.as_deref(),
            query.status,
            query.area_id,
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.booking.get(id).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations/code/:code - 按确认码查询预订
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.booking.find_by_code(&code).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations - 创建预订 (显式选桌)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    validate_contact(&payload.reservation)?;

    let reservation = state
        .booking
        .create(&payload.reservation, &payload.table_ids)
        .await?;
    Ok(ok_with_message(reservation, "Reservation created"))
}

/// POST /api/reservations/auto - 创建预订 (自动选桌)
pub async fn auto_create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    validate_contact(&payload)?;

    let reservation = state.booking.auto_create(&payload).await?;
    Ok(ok_with_message(reservation, "Reservation created"))
}

/// PUT /api/reservations/:id - 更新预订详情
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    if let Some(name) = &payload.contact_name {
        validate_required_text(name, "contact_name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &payload.contact_phone {
        validate_phone(phone, "contact_phone")?;
    }
    validate_email(&payload.contact_email, "contact_email")?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let reservation = state.booking.update_details(id, &payload).await?;
    Ok(ok_with_message(reservation, "Reservation updated"))
}

/// PATCH /api/reservations/:id/status - 员工流转预订状态
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let reservation = state.booking.transition(id, payload.status).await?;
    Ok(ok(reservation))
}

/// DELETE /api/reservations/:id - 客户取消预订
///
/// 只允许取消 pending 状态的预订；之后的取消须由餐厅操作
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let reservation = state.booking.cancel_by_customer(id).await?;
    Ok(ok_with_message(reservation, "Reservation cancelled"))
}

/// 联系人字段形状检查
fn validate_contact(input: &ReservationCreate) -> AppResult<()> {
    validate_required_text(&input.contact_name, "contact_name", MAX_NAME_LEN)?;
    validate_phone(&input.contact_phone, "contact_phone")?;
    validate_email(&input.contact_email, "contact_email")?;
    validate_optional_text(&input.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}
