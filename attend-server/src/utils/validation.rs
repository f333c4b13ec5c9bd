//! Input validation helpers
//!
//! Centralized limits and validation functions for the auth and attendance
//! handlers. SurrealDB does not enforce text lengths, so limits live here.

use validator::ValidateEmail;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Student display names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Subject labels and time slot display strings
pub const MAX_LABEL_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

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

/// Validate email syntax and length.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::validation(format!(
            "Email is too long ({} chars, max {MAX_EMAIL_LEN})",
            email.len()
        )));
    }
    if !email.validate_email() {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}

/// Validate password length bounds.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "Password must be at least 8 characters long",
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN} chars)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("Asha", "Name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "Name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "Name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn email_syntax_is_checked() {
        assert!(validate_email("student@college.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }
}
