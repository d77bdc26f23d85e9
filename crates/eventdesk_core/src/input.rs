//! Typed request parsing for the HTTP-facing payload contract.
//!
//! # Responsibility
//! - Turn raw JSON bodies and query-string values into validated inputs for
//!   the core services.
//! - Reject malformed payloads with `ValidationError` before any write.
//!
//! # Invariants
//! - A body that is not a JSON object is treated as `{}`, so it fails on the
//!   first required field instead of with a parse error.
//! - `null`, blank strings and `0` count as a missing id.
//! - Ids accept JSON integers or decimal strings.
//! - Feedback accepts JSON integers or integer strings; floats and booleans
//!   are rejected.
//! - Attendance `present` follows JSON truthiness and defaults to `true`.

use crate::model::event::{EventListQuery, NewEvent};
use crate::model::registration::{Feedback, RegistrationId, RegistrationListQuery};
use crate::model::student::NewStudent;
use crate::model::validation::{require_text, ValidationError};
use crate::service::report_service::DEFAULT_TOP_STUDENTS_LIMIT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Event creation body: `{title, description, date, type?, college_id?}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub kind: Option<String>,
    pub college_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCreateEvent {
    title: Option<Value>,
    description: Option<Value>,
    date: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    college_id: Option<Value>,
}

impl CreateEventRequest {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawCreateEvent = parse_object(body);
        Ok(Self {
            title: required_text("title", raw.title)?,
            description: required_text("description", raw.description)?,
            date: required_text("date", raw.date)?,
            kind: raw.kind.as_ref().and_then(text_value),
            college_id: raw.college_id.as_ref().and_then(text_value),
        })
    }

    pub fn into_new_event(self) -> NewEvent {
        NewEvent::new(
            self.title,
            self.description,
            self.date,
            self.kind,
            self.college_id,
        )
    }
}

/// Student creation body: `{name, email, college_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub college_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawCreateStudent {
    name: Option<Value>,
    email: Option<Value>,
    college_id: Option<Value>,
}

impl CreateStudentRequest {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawCreateStudent = parse_object(body);
        Ok(Self {
            name: required_text("name", raw.name)?,
            email: required_text("email", raw.email)?,
            college_id: required_text("college_id", raw.college_id)?,
        })
    }

    pub fn into_new_student(self) -> NewStudent {
        NewStudent::new(self.name, self.email, self.college_id)
    }
}

/// Registration body: `{event_id, student_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterRequest {
    pub event_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Default, Deserialize)]
struct RawRegister {
    event_id: Option<Value>,
    student_id: Option<Value>,
}

impl RegisterRequest {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawRegister = parse_object(body);
        Ok(Self {
            event_id: required_id("event_id", raw.event_id.as_ref())?,
            student_id: required_id("student_id", raw.student_id.as_ref())?,
        })
    }
}

/// Attendance body: `{registration_id, present?}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRequest {
    pub registration_id: RegistrationId,
    pub present: bool,
}

#[derive(Debug, Deserialize)]
struct RawAttendance {
    registration_id: Option<Value>,
    #[serde(default = "present_by_default")]
    present: Value,
}

impl Default for RawAttendance {
    fn default() -> Self {
        Self {
            registration_id: None,
            present: present_by_default(),
        }
    }
}

fn present_by_default() -> Value {
    Value::Bool(true)
}

impl AttendanceRequest {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawAttendance = parse_object(body);
        Ok(Self {
            registration_id: required_id("registration_id", raw.registration_id.as_ref())?,
            present: is_truthy(&raw.present),
        })
    }
}

/// Feedback body: `{registration_id, feedback}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub registration_id: RegistrationId,
    pub feedback: Feedback,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeedback {
    registration_id: Option<Value>,
    feedback: Option<Value>,
}

impl FeedbackRequest {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawFeedback = parse_object(body);
        let registration_id = required_id("registration_id", raw.registration_id.as_ref())?;
        let feedback = match raw.feedback.as_ref() {
            None => return Err(ValidationError::MissingField("feedback")),
            Some(value) => Feedback::new(integer_value("feedback", value)?)?,
        };
        Ok(Self {
            registration_id,
            feedback,
        })
    }
}

/// Builds the event list filter from `type` / `college_id` query values.
pub fn event_filter(kind: Option<&str>, college_id: Option<&str>) -> EventListQuery {
    EventListQuery {
        kind: optional_query_text(kind),
        college_id: optional_query_text(college_id),
    }
}

/// Builds the registration list filter from `event_id` / `student_id` query
/// values. Blank values mean "no filter".
pub fn registration_filter(
    event_id: Option<&str>,
    student_id: Option<&str>,
) -> Result<RegistrationListQuery, ValidationError> {
    Ok(RegistrationListQuery {
        event_id: optional_query_id("event_id", event_id)?,
        student_id: optional_query_id("student_id", student_id)?,
    })
}

/// Parses the `limit` query value for the top-students report.
///
/// Absent or blank input yields the default of 3.
pub fn parse_limit(raw: Option<&str>) -> Result<u32, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_TOP_STUDENTS_LIMIT),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidLimit(value.to_string())),
    }
}

fn parse_object<T: DeserializeOwned + Default>(body: &str) -> T {
    serde_json::from_str::<Value>(body)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn required_text(field: &'static str, value: Option<Value>) -> Result<String, ValidationError> {
    let text = value
        .as_ref()
        .and_then(text_value)
        .ok_or(ValidationError::MissingField(field))?;
    require_text(field, &text)?;
    Ok(text)
}

fn integer_value(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}

fn required_id(field: &'static str, value: Option<&Value>) -> Result<i64, ValidationError> {
    let value = match value {
        None | Some(Value::Null) => return Err(ValidationError::MissingField(field)),
        Some(Value::String(text)) if text.trim().is_empty() => {
            return Err(ValidationError::MissingField(field));
        }
        Some(value) => value,
    };

    match integer_value(field, value)? {
        0 => Err(ValidationError::MissingField(field)),
        id => Ok(id),
    }
}

fn optional_query_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn optional_query_id(field: &'static str, value: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ValidationError::NotAnInteger {
                field,
                value: text.to_string(),
            }),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
