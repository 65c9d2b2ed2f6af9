//! Validation utilities for user input

use crate::core::error::{AppError, Result};

/// Characters accepted as the "special" class of a strong password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// Minimum length for admin-set passwords (account creation and resets).
pub const MIN_ACCOUNT_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Validate a user id (login, lookups, top-ups)
pub fn validate_user_id(user_id: &str) -> ValidationResult {
    if user_id.trim().is_empty() {
        return ValidationResult::err("User ID is required.");
    }

    ValidationResult::ok()
}

/// Validate a password set by an admin: required, minimum length, confirmation matches.
pub fn validate_account_password(password: &str, confirm: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required.");
    }

    if password.chars().count() < MIN_ACCOUNT_PASSWORD_LEN {
        return ValidationResult::err(format!(
            "Password must be at least {} characters long.",
            MIN_ACCOUNT_PASSWORD_LEN
        ));
    }

    if password != confirm {
        return ValidationResult::err("Passwords do not match.");
    }

    ValidationResult::ok()
}

/// Validate password strength for a self-service change
pub fn validate_password(password: &str) -> ValidationResult {
    if password.chars().count() < 8 {
        return ValidationResult::err("New password must be at least 8 characters.");
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(has_uppercase && has_lowercase && has_digit && has_special) {
        return ValidationResult::err(
            "New password must include uppercase, lowercase, number, and special character.",
        );
    }

    ValidationResult::ok()
}

/// Parse a strictly positive amount.
pub fn parse_positive_amount(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(AppError::Validation(
            "Please enter a valid amount greater than 0.".to_string(),
        )),
    }
}

/// Parse a numeric form field, naming the field in the error.
pub fn parse_number(input: &str, field: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::Validation(format!("{} must be a number.", field)))
}

/// Optional numeric bound: empty means "not set".
pub fn parse_bound(input: &str, field: &str) -> Result<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_number(input, field).map(Some)
}
