//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for events, students,
//!   registrations and reports.
//! - Isolate SQL details from service orchestration.
//! - Translate SQLite constraint failures into typed outcomes.
//!
//! # Invariants
//! - Write paths validate inputs before any SQL mutation.
//! - Repositories only accept connections whose schema is bootstrapped.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::schema::{current_user_version, latest_version, table_exists, REQUIRED_TABLES};
use crate::db::DbError;
use crate::model::event::EventId;
use crate::model::student::StudentId;
use crate::model::validation::ValidationError;
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_repo;
pub mod registration_repo;
pub mod report_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which uniqueness rule a rejected write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Another student already uses this email.
    StudentEmail,
    /// The student already holds a registration for the event.
    Registration {
        event_id: EventId,
        student_id: StudentId,
    },
}

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    /// Unique constraint rejected the write; nothing was persisted.
    Duplicate(Conflict),
    /// Registration references an event or student that does not exist.
    MissingReference {
        event_id: EventId,
        student_id: StudentId,
    },
    Db(DbError),
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(Conflict::StudentEmail) => write!(f, "email already exists"),
            Self::Duplicate(Conflict::Registration {
                event_id,
                student_id,
            }) => write!(
                f,
                "student {student_id} is already registered for event {event_id}"
            ),
            Self::MissingReference {
                event_id,
                student_id,
            } => write!(
                f,
                "event {event_id} or student {student_id} does not exist"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Constraint family reported by SQLite's extended result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    Unique,
    ForeignKey,
}

pub(crate) fn constraint_kind(err: &rusqlite::Error) -> Option<ConstraintKind> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                Some(ConstraintKind::Unique)
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// Optional text filter; blank input means "no filter".
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
