//! Event domain model.
//!
//! # Invariants
//! - `title`, `description` and `date` are never blank.
//! - `kind` falls back to [`DEFAULT_EVENT_TYPE`] and `college_id` to
//!   [`DEFAULT_COLLEGE_ID`] when the caller omits them.
//! - Events are immutable once created.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Surrogate id generated by the store.
pub type EventId = i64;

/// Category used when the caller does not supply one.
pub const DEFAULT_EVENT_TYPE: &str = "General";
/// College identifier used when the caller does not supply one.
pub const DEFAULT_COLLEGE_ID: &str = "C-001";

/// Persisted event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// ISO-8601 calendar date, stored as text.
    pub date: String,
    /// Free-text category (Workshop, Fest, Seminar, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub college_id: String,
}

/// Write-side input for event creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub kind: String,
    pub college_id: String,
}

impl NewEvent {
    /// Builds an event input, applying defaults for omitted or blank
    /// `kind`/`college_id`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        kind: Option<String>,
        college_id: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date: date.into(),
            kind: or_default(kind, DEFAULT_EVENT_TYPE),
            college_id: or_default(college_id, DEFAULT_COLLEGE_ID),
        }
    }

    /// Checks required fields. Called by repositories before every insert.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("date", &self.date)?;
        Ok(())
    }
}

/// Optional equality filters for event listing, AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListQuery {
    pub kind: Option<String>,
    pub college_id: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, NewEvent, DEFAULT_COLLEGE_ID, DEFAULT_EVENT_TYPE};
    use crate::model::validation::ValidationError;

    #[test]
    fn omitted_and_blank_optionals_use_defaults() {
        let omitted = NewEvent::new("Hack Day", "All night", "2024-03-01", None, None);
        assert_eq!(omitted.kind, DEFAULT_EVENT_TYPE);
        assert_eq!(omitted.college_id, DEFAULT_COLLEGE_ID);

        let blank = NewEvent::new(
            "Hack Day",
            "All night",
            "2024-03-01",
            Some(" ".to_string()),
            Some(String::new()),
        );
        assert_eq!(blank.kind, DEFAULT_EVENT_TYPE);
        assert_eq!(blank.college_id, DEFAULT_COLLEGE_ID);
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let event = NewEvent::new("Hack Day", "", "", None, None);
        assert_eq!(
            event.validate(),
            Err(ValidationError::MissingField("description"))
        );
    }

    #[test]
    fn kind_serializes_as_type() {
        let event = Event {
            id: 1,
            title: "Hack Day".to_string(),
            description: "All night".to_string(),
            date: "2024-03-01".to_string(),
            kind: "Fest".to_string(),
            college_id: "C-001".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "Fest");
        assert!(value.get("kind").is_none());
    }
}
