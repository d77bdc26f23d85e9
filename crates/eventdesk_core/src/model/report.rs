//! Read models produced by the reporting queries.
//!
//! Percentages and averages are rounded to two decimal places by the store.

use crate::model::event::EventId;
use crate::model::student::StudentId;
use serde::{Deserialize, Serialize};

/// Registrations per event, including events nobody registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistrationCount {
    #[serde(rename = "id")]
    pub event_id: EventId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub college_id: String,
    pub registrations: i64,
}

/// Attendance ratio per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttendance {
    #[serde(rename = "id")]
    pub event_id: EventId,
    pub title: String,
    pub total: i64,
    pub attended: i64,
    /// `0.0` when `total == 0`.
    pub attendance_pct: f64,
}

/// Mean feedback per event that received at least one rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFeedback {
    #[serde(rename = "id")]
    pub event_id: EventId,
    pub title: String,
    pub avg_feedback: f64,
}

/// Participation summary per student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentActivity {
    #[serde(rename = "id")]
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub college_id: String,
    pub events_attended: i64,
    pub registrations: i64,
}

/// All four report views captured from one consistent read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub registrations: Vec<EventRegistrationCount>,
    pub attendance: Vec<EventAttendance>,
    pub feedback: Vec<EventFeedback>,
    pub top_students: Vec<StudentActivity>,
}
