//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are applied here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Notes, order details, internal notes
pub const MAX_NOTE_LEN: usize = 500;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Domain ranges ───────────────────────────────────────────────────

/// Price per can: inclusive bounds
pub const MIN_PRICE_PER_CAN: i64 = 1;
pub const MAX_PRICE_PER_CAN: i64 = 999;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty after trim and within the length limit.
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

/// Validate price per can is within [1, 999].
pub fn validate_price_per_can(price: i64) -> Result<(), AppError> {
    if !(MIN_PRICE_PER_CAN..=MAX_PRICE_PER_CAN).contains(&price) {
        return Err(AppError::validation(format!(
            "Price per can must be between {MIN_PRICE_PER_CAN} and {MAX_PRICE_PER_CAN}"
        )));
    }
    Ok(())
}

/// Validate a can count is at least 1.
pub fn validate_cans(cans: i64) -> Result<(), AppError> {
    if cans < 1 {
        return Err(AppError::validation("Cans must be at least 1"));
    }
    Ok(())
}

/// Validate a default can count is not negative.
pub fn validate_default_cans(cans: i64) -> Result<(), AppError> {
    if cans < 0 {
        return Err(AppError::validation("Default cans must not be negative"));
    }
    Ok(())
}
