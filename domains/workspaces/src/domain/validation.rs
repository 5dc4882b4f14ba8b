//! Validation helpers for operation inputs

use validator::ValidationError;

/// Reject strings made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim surrounding whitespace from a display name
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}
