//! Input validation failures.
//!
//! Every variant maps to HTTP 400 once it reaches the API layer (through
//! [`CoreError::Validation`](crate::error::CoreError::Validation)).

/// A request field that failed a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A date field that is not a `YYYY-MM-DD` calendar date.
    #[error("{field} must be a calendar date in YYYY-MM-DD form, got '{value}'")]
    BadDate { field: &'static str, value: String },

    /// A status that is not one of the recognised literals.
    #[error("invalid status '{0}' (allowed: 'Backlog', 'In_Progress', 'Done')")]
    InvalidStatus(String),

    /// A string shorter than its minimum length after trimming.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    /// A required string that is empty after trimming.
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// Trim `value` and require at least `min` characters.
///
/// Returns the trimmed string on success. Length is counted in characters,
/// not bytes, so multi-byte names are measured the way users see them.
pub fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(trimmed.to_string())
}

/// Trim `value` and reject it when nothing is left.
pub fn require_not_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(trimmed.to_string())
}
