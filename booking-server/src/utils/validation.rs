//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names, notes, descriptions
//! - SQLite TEXT has no built-in length enforcement

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: area, table, menu item, contact name
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, special requests
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, category labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a count is strictly positive.
pub fn validate_positive(value: i32, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

// ── Contact shape checks ────────────────────────────────────────────

/// Validate a contact phone number.
///
/// Accepts digits plus the usual separators (+, spaces, dashes, dots,
/// parentheses); requires at least 6 digits.
pub fn validate_phone(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_SHORT_TEXT_LEN)?;

    let digits = value.chars().filter(char::is_ascii_digit).count();
    let shape_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'));

    if digits < 6 || !shape_ok {
        return Err(AppError::validation(format!(
            "{field} is not a valid phone number"
        )));
    }
    Ok(())
}

/// Validate an optional email address (RFC shape + length).
pub fn validate_email(value: &Option<String>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.len() > MAX_EMAIL_LEN {
            return Err(AppError::validation(format!(
                "{field} is too long ({} chars, max {MAX_EMAIL_LEN})",
                v.len()
            )));
        }
        if !v.validate_email() {
            return Err(AppError::validation(format!(
                "{field} is not a valid email address"
            )));
        }
    }
    Ok(())
}
