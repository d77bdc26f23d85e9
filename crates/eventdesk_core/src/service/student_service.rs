//! Student roster use-cases.

use crate::model::student::{NewStudent, Student, StudentId};
use crate::repo::student_repo::StudentRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service for enrolling and browsing students.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a student.
    ///
    /// # Errors
    /// - `RepoError::Validation` when any field is blank.
    /// - `RepoError::Duplicate` when the email is already taken.
    pub fn create_student(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        college_id: impl Into<String>,
    ) -> RepoResult<Student> {
        self.create_from(&NewStudent::new(name, email, college_id))
    }

    pub fn create_from(&self, input: &NewStudent) -> RepoResult<Student> {
        match self.repo.create_student(input) {
            Ok(student) => {
                info!(
                    "event=student_create module=service status=ok student_id={}",
                    student.id
                );
                Ok(student)
            }
            Err(err @ RepoError::Duplicate(_)) => {
                warn!("event=student_create module=service status=duplicate");
                Err(err)
            }
            Err(err) => {
                warn!("event=student_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_student(id)
    }

    /// Lists students newest first, optionally for one college.
    pub fn list_students(&self, college_id: Option<&str>) -> RepoResult<Vec<Student>> {
        self.repo.list_students(college_id)
    }
}
