//! Registration domain model.
//!
//! # Responsibility
//! - Link one student to one event and carry attendance/feedback state.
//!
//! # Invariants
//! - `(event_id, student_id)` is unique.
//! - New registrations start as `{attendance: false, feedback: None}`.
//! - `attendance` and `feedback` change independently, any number of times.
//! - `feedback`, when present, is within `1..=5`.

use crate::model::event::EventId;
use crate::model::student::StudentId;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub type RegistrationId = i64;

/// Rating a student gives an event, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Feedback(u8);

impl Feedback {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    /// Validates a raw rating.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::FeedbackOutOfRange(value));
        }
        // Range check above keeps the cast lossless.
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Feedback {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Feedback> for i64 {
    fn from(value: Feedback) -> Self {
        i64::from(value.0)
    }
}

/// Persisted registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub student_id: StudentId,
    pub attendance: bool,
    pub feedback: Option<Feedback>,
    /// Store-assigned UTC timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

/// Registration joined with the owning event title and student name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationView {
    #[serde(flatten)]
    pub registration: Registration,
    pub event_title: String,
    pub student_name: String,
}

/// Optional equality filters for registration listing, AND-combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationListQuery {
    pub event_id: Option<EventId>,
    pub student_id: Option<StudentId>,
}
