//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation lifecycle state.
///
/// Allowed transitions:
/// - pending -> confirmed | cancelled
/// - confirmed -> seated | cancelled
/// - seated -> completed
/// - completed / cancelled are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether `self -> to` is a legal lifecycle transition.
    pub fn can_transition_to(&self, to: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Seated)
                | (Confirmed, Cancelled)
                | (Seated, Completed)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Completed | ReservationStatus::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Payment state of the pre-order attached to a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

/// A pre-ordered dish, captured with its name and price at booking time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreOrderItem {
    pub menu_item_id: i64,
    pub name: String,
    /// Unit price in minor units at the moment of booking
    pub price: i64,
    pub quantity: i32,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Human-facing confirmation code (MB-xxxx)
    pub code: String,
    pub area_id: i64,
    /// Service date, "YYYY-MM-DD" in the restaurant timezone
    pub date: String,
    pub slot_id: i64,
    pub guest_count: i32,
    pub status: ReservationStatus,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub payment_status: PaymentStatus,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub pre_order_items: Vec<PreOrderItem>,
    /// Sum of item price * quantity, minor units
    pub pre_order_subtotal: i64,
    /// Subtotal after the pre-order discount, minor units
    pub pre_order_total: i64,
    pub created_at: i64,
    pub updated_at: i64,
    /// Tables held by this reservation, loaded from the assignment rows
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub table_ids: Vec<i64>,
}

/// Pre-order line as submitted by the client; price is resolved server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreOrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i32,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub area_id: i64,
    pub date: String,
    pub slot_id: i64,
    pub guest_count: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub pre_order_items: Vec<PreOrderItemInput>,
}

/// Update reservation payload (details only, never the status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub guest_count: Option<i32>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    /// Replaces the whole pre-order when present; re-priced server-side
    pub pre_order_items: Option<Vec<PreOrderItemInput>>,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}
