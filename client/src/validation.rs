//! Field format validators for campaign service forms.
//!
//! Each validator checks a single wire-format rule and reports a stable error
//! code. The service clients run them after the requiredness pass and map
//! failures to the human-readable messages their APIs documented, so every
//! violated rule is reported in one sweep rather than fail-fast.

use validator::ValidationError;

/// Validates a two-digit credit-card expiration month (`01`–`12`).
///
/// # Errors
///
/// Returns a `ValidationError` if the value is not exactly two ASCII digits
/// or falls outside `01`–`12` (`00`, `13`, `1`, `ab` all fail).
pub fn validate_expiration_month(value: &str) -> Result<(), ValidationError> {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_expiration_month"));
    }
    match value.parse::<u8>() {
        Ok(1..=12) => Ok(()),
        _ => Err(ValidationError::new("invalid_expiration_month")),
    }
}

/// Validates a two-digit credit-card expiration year (`00`–`99`).
///
/// # Errors
///
/// Returns a `ValidationError` unless the value is exactly two ASCII digits.
pub fn validate_expiration_year(value: &str) -> Result<(), ValidationError> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_expiration_year"))
    }
}

/// Validates an election cycle: a four-digit year from 1900 through 2099.
///
/// # Errors
///
/// Returns a `ValidationError` for years outside `1900..=2099`.
pub fn validate_election_cycle(year: u16) -> Result<(), ValidationError> {
    if (1900..=2099).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_election_cycle"))
    }
}

/// Validates a recurring contribution term: 1 through 24 total charges.
///
/// # Errors
///
/// Returns a `ValidationError` for terms outside `1..=24`.
pub fn validate_recurring_term(term: u8) -> Result<(), ValidationError> {
    if (1..=24).contains(&term) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_recurring_term"))
    }
}

/// Validates a contribution amount: at least one dollar.
///
/// # Errors
///
/// Returns a `ValidationError` for amounts below `1.0`.
pub fn validate_contribution_amount(amount: f64) -> Result<(), ValidationError> {
    if amount >= 1.0 {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_contribution_amount"))
    }
}
