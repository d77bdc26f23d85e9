//! Field-level validation shared by write paths and the request boundary.
//!
//! # Invariants
//! - A `ValidationError` is always raised before any SQL mutation runs.
//! - Blank (whitespace-only) text counts as missing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent, null, or blank.
    MissingField(&'static str),
    /// Numeric field holds something that is not an integer.
    NotAnInteger { field: &'static str, value: String },
    /// Feedback integer outside `1..=5`.
    FeedbackOutOfRange(i64),
    /// Report limit that is not a non-negative integer.
    InvalidLimit(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::NotAnInteger { field, value } => {
                write!(f, "field `{field}` must be an integer, got `{value}`")
            }
            Self::FeedbackOutOfRange(value) => {
                write!(f, "feedback must be an integer 1-5, got {value}")
            }
            Self::InvalidLimit(value) => {
                write!(f, "limit must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Fails with [`ValidationError::MissingField`] when `value` is blank.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(
            require_text("title", "  \t"),
            Err(ValidationError::MissingField("title"))
        );
        assert!(require_text("title", "Hack Day").is_ok());
    }

    #[test]
    fn display_names_the_field() {
        let err = ValidationError::NotAnInteger {
            field: "event_id",
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("event_id"));
    }
}
