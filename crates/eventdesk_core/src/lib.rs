//! Core domain logic for EventDesk, the college event-management backend.
//! This crate is the single source of truth for registration, attendance,
//! feedback and reporting invariants.

pub mod config;
pub mod db;
pub mod input;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::Settings;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{Event, EventId, EventListQuery, NewEvent};
pub use model::registration::{
    Feedback, Registration, RegistrationId, RegistrationListQuery, RegistrationView,
};
pub use model::report::{
    EventAttendance, EventFeedback, EventRegistrationCount, ReportBundle, StudentActivity,
};
pub use model::student::{NewStudent, Student, StudentId};
pub use model::validation::ValidationError;
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::registration_repo::{RegistrationRepository, SqliteRegistrationRepository};
pub use repo::report_repo::{ReportRepository, SqliteReportRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{Conflict, RepoError, RepoResult};
pub use service::event_service::EventService;
pub use service::registration_service::RegistrationService;
pub use service::report_service::{ReportService, DEFAULT_TOP_STUDENTS_LIMIT};
pub use service::student_service::StudentService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
