//! Read-only aggregation queries over events, students and registrations.
//!
//! # Invariants
//! - Every call recomputes from current storage; nothing is cached.
//! - Ties are always broken by title (events) or name (students) ascending.
//! - Division by zero cannot occur: events without registrations report
//!   `attendance_pct = 0.0`.
//! - `top_students` binds its limit as a parameter.

use crate::model::report::{
    EventAttendance, EventFeedback, EventRegistrationCount, ReportBundle, StudentActivity,
};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{Connection, Row};

const REGISTRATION_COUNTS_SQL: &str = "SELECT
    e.id,
    e.title,
    e.type,
    e.college_id,
    COUNT(r.id) AS registrations
FROM events e
LEFT JOIN registrations r ON r.event_id = e.id
GROUP BY e.id
ORDER BY registrations DESC, e.title ASC;";

const ATTENDANCE_RATES_SQL: &str = "SELECT
    e.id,
    e.title,
    COUNT(r.id) AS total,
    COALESCE(SUM(r.attendance), 0) AS attended,
    CASE WHEN COUNT(r.id) = 0 THEN 0.0
         ELSE ROUND(SUM(r.attendance) * 100.0 / COUNT(r.id), 2)
    END AS attendance_pct
FROM events e
LEFT JOIN registrations r ON r.event_id = e.id
GROUP BY e.id
ORDER BY attendance_pct DESC, e.title ASC;";

const AVERAGE_FEEDBACK_SQL: &str = "SELECT
    e.id,
    e.title,
    ROUND(AVG(r.feedback), 2) AS avg_feedback
FROM events e
INNER JOIN registrations r ON r.event_id = e.id AND r.feedback IS NOT NULL
GROUP BY e.id
HAVING COUNT(r.feedback) > 0
ORDER BY avg_feedback DESC, e.title ASC;";

const TOP_STUDENTS_SQL: &str = "SELECT
    s.id,
    s.name,
    s.email,
    s.college_id,
    COALESCE(SUM(r.attendance), 0) AS events_attended,
    COUNT(r.id) AS registrations
FROM students s
LEFT JOIN registrations r ON r.student_id = s.id
GROUP BY s.id
ORDER BY events_attended DESC, registrations DESC, s.name ASC
LIMIT ?1;";

/// Repository interface for report views.
pub trait ReportRepository {
    fn registration_counts(&self) -> RepoResult<Vec<EventRegistrationCount>>;
    fn attendance_rates(&self) -> RepoResult<Vec<EventAttendance>>;
    fn average_feedback(&self) -> RepoResult<Vec<EventFeedback>>;
    fn top_students(&self, limit: u32) -> RepoResult<Vec<StudentActivity>>;
    /// Reads all four views inside one transaction.
    fn report_bundle(&self, top_students_limit: u32) -> RepoResult<ReportBundle>;
}

/// SQLite-backed report queries.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn registration_counts(&self) -> RepoResult<Vec<EventRegistrationCount>> {
        registration_counts(self.conn)
    }

    fn attendance_rates(&self) -> RepoResult<Vec<EventAttendance>> {
        attendance_rates(self.conn)
    }

    fn average_feedback(&self) -> RepoResult<Vec<EventFeedback>> {
        average_feedback(self.conn)
    }

    fn top_students(&self, limit: u32) -> RepoResult<Vec<StudentActivity>> {
        top_students(self.conn, limit)
    }

    fn report_bundle(&self, top_students_limit: u32) -> RepoResult<ReportBundle> {
        // Deferred read transaction: all four views see the same snapshot.
        let tx = self.conn.unchecked_transaction()?;
        let bundle = ReportBundle {
            registrations: registration_counts(&tx)?,
            attendance: attendance_rates(&tx)?,
            feedback: average_feedback(&tx)?,
            top_students: top_students(&tx, top_students_limit)?,
        };
        tx.commit()?;
        Ok(bundle)
    }
}

fn registration_counts(conn: &Connection) -> RepoResult<Vec<EventRegistrationCount>> {
    collect_rows(conn, REGISTRATION_COUNTS_SQL, [], |row| {
        Ok(EventRegistrationCount {
            event_id: row.get("id")?,
            title: row.get("title")?,
            kind: row.get("type")?,
            college_id: row.get("college_id")?,
            registrations: row.get("registrations")?,
        })
    })
}

fn attendance_rates(conn: &Connection) -> RepoResult<Vec<EventAttendance>> {
    collect_rows(conn, ATTENDANCE_RATES_SQL, [], |row| {
        Ok(EventAttendance {
            event_id: row.get("id")?,
            title: row.get("title")?,
            total: row.get("total")?,
            attended: row.get("attended")?,
            attendance_pct: row.get("attendance_pct")?,
        })
    })
}

fn average_feedback(conn: &Connection) -> RepoResult<Vec<EventFeedback>> {
    collect_rows(conn, AVERAGE_FEEDBACK_SQL, [], |row| {
        Ok(EventFeedback {
            event_id: row.get("id")?,
            title: row.get("title")?,
            avg_feedback: row.get("avg_feedback")?,
        })
    })
}

fn top_students(conn: &Connection, limit: u32) -> RepoResult<Vec<StudentActivity>> {
    collect_rows(conn, TOP_STUDENTS_SQL, [i64::from(limit)], |row| {
        Ok(StudentActivity {
            student_id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            college_id: row.get("college_id")?,
            events_attended: row.get("events_attended")?,
            registrations: row.get("registrations")?,
        })
    })
}

fn collect_rows<T, P>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> RepoResult<Vec<T>>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
