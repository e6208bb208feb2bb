//! Time Slot Model

use serde::{Deserialize, Serialize};

/// A bookable service window. Slots are non-overlapping within a day and
/// a reservation always occupies exactly one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TimeSlot {
    pub id: i64,
    /// Display label (e.g. "13:00 - 14:00")
    pub name: String,
    /// Inclusive start, "HH:MM"
    pub start_time: String,
    /// Exclusive end, "HH:MM"
    pub end_time: String,
    pub is_active: bool,
}

impl TimeSlot {
    /// Build the default hourly slot set covering `[open_hour, close_hour)`.
    /// Ids are 1-based and stable across restarts so reservations can
    /// reference them directly.
    pub fn default_set(open_hour: u32, close_hour: u32) -> Vec<TimeSlot> {
        (open_hour..close_hour)
            .enumerate()
            .map(|(idx, hour)| TimeSlot {
                id: idx as i64 + 1,
                name: format!("{:02}:00 - {:02}:00", hour, hour + 1),
                start_time: format!("{:02}:00", hour),
                end_time: format!("{:02}:00", hour + 1),
                is_active: true,
            })
            .collect()
    }
}
