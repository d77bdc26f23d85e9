//! Student repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_student` calls `NewStudent::validate()` before inserting.
//! - A colliding email surfaces as `RepoError::Duplicate`, never as a raw
//!   SQLite error, and leaves the table untouched.
//! - Listing is ordered `id DESC` (newest first).

use crate::model::student::{NewStudent, Student, StudentId};
use crate::repo::{
    constraint_kind, ensure_connection_ready, non_blank, Conflict, ConstraintKind, RepoError,
    RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, email, college_id FROM students";

/// Repository interface for student operations.
pub trait StudentRepository {
    fn create_student(&self, student: &NewStudent) -> RepoResult<Student>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn list_students(&self, college_id: Option<&str>) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &NewStudent) -> RepoResult<Student> {
        student.validate()?;

        self.conn
            .execute(
                "INSERT INTO students (name, email, college_id) VALUES (?1, ?2, ?3);",
                params![
                    student.name.as_str(),
                    student.email.as_str(),
                    student.college_id.as_str(),
                ],
            )
            .map_err(|err| match constraint_kind(&err) {
                Some(ConstraintKind::Unique) => RepoError::Duplicate(Conflict::StudentEmail),
                _ => err.into(),
            })?;

        let id = self.conn.last_insert_rowid();
        self.get_student(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created student {id} not found in read-back"))
        })
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn list_students(&self, college_id: Option<&str>) -> RepoResult<Vec<Student>> {
        let mut sql = STUDENT_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(college_id) = non_blank(college_id) {
            sql.push_str(" WHERE college_id = ?");
            bind_values.push(Value::Text(college_id.to_string()));
        }

        sql.push_str(" ORDER BY id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let students = stmt
            .query_map(params_from_iter(bind_values), parse_student_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        college_id: row.get("college_id")?,
    })
}
