//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so handlers run these
//! before anything reaches the repositories.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, customer
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone, zip code, city, state, country
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Size labels per product
pub const MAX_SIZES: usize = 50;

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
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

/// Structural email check — enough to reject obvious garbage, uniqueness is
/// the database's job.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation("email is not a valid address"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

/// Validate a price value (finite, non-negative, sane upper bound)
pub fn validate_price(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    if value > 1_000_000.0 {
        return Err(AppError::validation("price exceeds the maximum allowed"));
    }
    Ok(())
}

/// Validate a stock value (non-negative)
pub fn validate_stock(value: i64) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation("stock must not be negative"));
    }
    Ok(())
}

/// Validate the size label list
pub fn validate_sizes(sizes: &[String]) -> Result<(), AppError> {
    if sizes.len() > MAX_SIZES {
        return Err(AppError::validation(format!(
            "too many sizes ({}, max {MAX_SIZES})",
            sizes.len()
        )));
    }
    for size in sizes {
        validate_required_text(size, "size", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}
