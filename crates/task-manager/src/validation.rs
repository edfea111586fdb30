//! Input checks shared by the services.

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 3;
pub const MIN_LABEL_LEN: usize = 3;
pub const MAX_LABEL_LEN: usize = 1000;

/// Require a syntactically plausible email address.
pub fn email(value: &str) -> AppResult<()> {
    let invalid = || AppError::Validation(format!("'{}' is not a valid email", value));

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn password(value: &str) -> AppResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Require a value whose trimmed length lies within `min..=max` characters.
pub fn length(field: &str, value: &str, min: usize, max: usize) -> AppResult<()> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "'{}' must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

pub fn not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("'{}' must not be blank", field)));
    }
    Ok(())
}
