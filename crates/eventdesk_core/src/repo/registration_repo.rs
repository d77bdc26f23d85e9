//! Registration repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist student/event registrations and their attendance/feedback state.
//! - Provide the joined registration listing.
//!
//! # Invariants
//! - At most one row per `(event_id, student_id)`; the second insert fails
//!   with `RepoError::Duplicate` and writes nothing.
//! - Both ids must reference existing rows at insert time.
//! - Attendance/feedback updates report whether a row was touched instead of
//!   failing on unknown ids.
//! - Listing is ordered `created_at DESC, id DESC`.

use crate::model::event::EventId;
use crate::model::registration::{
    Feedback, Registration, RegistrationId, RegistrationListQuery, RegistrationView,
};
use crate::model::student::StudentId;
use crate::model::validation::ValidationError;
use crate::repo::{
    bool_to_int, constraint_kind, ensure_connection_ready, Conflict, ConstraintKind, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const REGISTRATION_SELECT_SQL: &str = "SELECT
    id,
    event_id,
    student_id,
    attendance,
    feedback,
    created_at
FROM registrations";

/// Repository interface for registration operations.
pub trait RegistrationRepository {
    /// Inserts a fresh registration (`attendance = false`, no feedback).
    fn create_registration(
        &self,
        event_id: EventId,
        student_id: StudentId,
    ) -> RepoResult<Registration>;
    fn get_registration(&self, id: RegistrationId) -> RepoResult<Option<Registration>>;
    fn list_registrations(&self, query: &RegistrationListQuery)
        -> RepoResult<Vec<RegistrationView>>;
    /// Returns `false` when no registration has this id.
    fn set_attendance(&self, id: RegistrationId, present: bool) -> RepoResult<bool>;
    /// Returns `false` when no registration has this id.
    fn set_feedback(&self, id: RegistrationId, feedback: Feedback) -> RepoResult<bool>;
}

/// SQLite-backed registration repository.
pub struct SqliteRegistrationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegistrationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RegistrationRepository for SqliteRegistrationRepository<'_> {
    fn create_registration(
        &self,
        event_id: EventId,
        student_id: StudentId,
    ) -> RepoResult<Registration> {
        require_id("event_id", event_id)?;
        require_id("student_id", student_id)?;

        self.conn
            .execute(
                "INSERT INTO registrations (event_id, student_id) VALUES (?1, ?2);",
                params![event_id, student_id],
            )
            .map_err(|err| match constraint_kind(&err) {
                Some(ConstraintKind::Unique) => RepoError::Duplicate(Conflict::Registration {
                    event_id,
                    student_id,
                }),
                Some(ConstraintKind::ForeignKey) => RepoError::MissingReference {
                    event_id,
                    student_id,
                },
                None => err.into(),
            })?;

        let id = self.conn.last_insert_rowid();
        self.get_registration(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created registration {id} not found in read-back"))
        })
    }

    fn get_registration(&self, id: RegistrationId) -> RepoResult<Option<Registration>> {
        self.conn
            .query_row(
                &format!("{REGISTRATION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                RawRegistration::from_row,
            )
            .optional()?
            .map(RawRegistration::into_registration)
            .transpose()
    }

    fn list_registrations(
        &self,
        query: &RegistrationListQuery,
    ) -> RepoResult<Vec<RegistrationView>> {
        let mut sql = String::from(
            "SELECT
                r.id,
                r.event_id,
                r.student_id,
                r.attendance,
                r.feedback,
                r.created_at,
                e.title AS event_title,
                s.name AS student_name
             FROM registrations r
             INNER JOIN events e ON e.id = r.event_id
             INNER JOIN students s ON s.id = r.student_id
             WHERE 1 = 1",
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(event_id) = query.event_id {
            sql.push_str(" AND r.event_id = ?");
            bind_values.push(Value::Integer(event_id));
        }

        if let Some(student_id) = query.student_id {
            sql.push_str(" AND r.student_id = ?");
            bind_values.push(Value::Integer(student_id));
        }

        sql.push_str(" ORDER BY r.created_at DESC, r.id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            let registration = RawRegistration::from_row(row)?.into_registration()?;
            views.push(RegistrationView {
                registration,
                event_title: row.get("event_title")?,
                student_name: row.get("student_name")?,
            });
        }

        Ok(views)
    }

    fn set_attendance(&self, id: RegistrationId, present: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE registrations SET attendance = ?1 WHERE id = ?2;",
            params![bool_to_int(present), id],
        )?;
        Ok(changed > 0)
    }

    fn set_feedback(&self, id: RegistrationId, feedback: Feedback) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE registrations SET feedback = ?1 WHERE id = ?2;",
            params![i64::from(feedback), id],
        )?;
        Ok(changed > 0)
    }
}

/// Ids are store-generated and start at 1; anything else counts as missing.
fn require_id(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Column values as stored, before domain checks.
struct RawRegistration {
    id: RegistrationId,
    event_id: EventId,
    student_id: StudentId,
    attendance: i64,
    feedback: Option<i64>,
    created_at: Option<String>,
}

impl RawRegistration {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            event_id: row.get("event_id")?,
            student_id: row.get("student_id")?,
            attendance: row.get("attendance")?,
            feedback: row.get("feedback")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_registration(self) -> RepoResult<Registration> {
        let attendance = match self.attendance {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid attendance value `{other}` in registrations.attendance"
                )));
            }
        };

        let feedback = match self.feedback {
            Some(value) => Some(Feedback::new(value).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid feedback value `{value}` in registrations.feedback"
                ))
            })?),
            None => None,
        };

        let created_at = self.created_at.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "registration {} has no created_at timestamp",
                self.id
            ))
        })?;

        Ok(Registration {
            id: self.id,
            event_id: self.event_id,
            student_id: self.student_id,
            attendance,
            feedback,
            created_at,
        })
    }
}
