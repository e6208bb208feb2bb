use crate::db::repository::RepoError;
use crate::utils::AppError;
use shared::models::ReservationStatus;
use thiserror::Error;

/// Booking errors
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("No availability: {0}")]
    NoAvailability(String),

    #[error("Invalid transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Concurrent booking conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 预订错误到 API 错误的映射
///
/// 时间窗/容量/状态流转问题是业务规则违反 (422)；
/// 桌位被抢是冲突 (409)；其余按语义归类。
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Repo(e) => AppError::from(e),
            BookingError::NotFound(msg) => AppError::NotFound(msg),
            BookingError::InvalidTimeWindow(msg) => AppError::BusinessRule(msg),
            BookingError::CapacityExceeded(msg) => AppError::BusinessRule(msg),
            BookingError::NoAvailability(msg) => AppError::Conflict(msg),
            e @ BookingError::InvalidTransition { .. } => AppError::BusinessRule(e.to_string()),
            BookingError::ConcurrencyConflict(msg) => AppError::Conflict(msg),
            BookingError::InvalidOperation(msg) => AppError::BusinessRule(msg),
            BookingError::Validation(msg) => AppError::Validation(msg),
            BookingError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
