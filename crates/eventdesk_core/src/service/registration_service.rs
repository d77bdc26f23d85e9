//! Registration lifecycle use-cases: register, mark attendance, record feedback.
//!
//! # Invariants
//! - A new registration starts with `attendance = false` and no feedback.
//! - Attendance and feedback are set independently and idempotently.
//! - Updating an unknown registration id is a silent no-op returning `None`.
//!   This mirrors the behavior existing clients depend on; callers that need
//!   a hard failure must check for `None` themselves.

use crate::model::event::EventId;
use crate::model::registration::{
    Feedback, Registration, RegistrationId, RegistrationListQuery, RegistrationView,
};
use crate::model::student::StudentId;
use crate::repo::registration_repo::RegistrationRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service for the registration lifecycle.
pub struct RegistrationService<R: RegistrationRepository> {
    repo: R,
}

impl<R: RegistrationRepository> RegistrationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a student for an event.
    ///
    /// # Errors
    /// - `RepoError::Validation` when either id is missing (non-positive).
    /// - `RepoError::Duplicate` when the pair is already registered.
    /// - `RepoError::MissingReference` when the event or student does not exist.
    pub fn register(&self, event_id: EventId, student_id: StudentId) -> RepoResult<Registration> {
        match self.repo.create_registration(event_id, student_id) {
            Ok(registration) => {
                info!(
                    "event=registration_create module=service status=ok registration_id={} event_id={} student_id={}",
                    registration.id, event_id, student_id
                );
                Ok(registration)
            }
            Err(err @ RepoError::Duplicate(_)) => {
                warn!(
                    "event=registration_create module=service status=duplicate event_id={event_id} student_id={student_id}"
                );
                Err(err)
            }
            Err(err) => {
                warn!(
                    "event=registration_create module=service status=error event_id={event_id} student_id={student_id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Sets attendance and returns the updated row, or `None` for unknown ids.
    pub fn mark_attendance(
        &self,
        registration_id: RegistrationId,
        present: bool,
    ) -> RepoResult<Option<Registration>> {
        let changed = self.repo.set_attendance(registration_id, present)?;
        if !changed {
            warn!(
                "event=attendance_mark module=service status=noop registration_id={registration_id}"
            );
            return Ok(None);
        }

        info!(
            "event=attendance_mark module=service status=ok registration_id={registration_id} present={present}"
        );
        self.repo.get_registration(registration_id)
    }

    /// Validates and stores a 1-5 rating, returning the updated row or `None`
    /// for unknown ids.
    ///
    /// # Errors
    /// - `RepoError::Validation` when `feedback` is outside `1..=5`; nothing
    ///   is written in that case.
    pub fn record_feedback(
        &self,
        registration_id: RegistrationId,
        feedback: i64,
    ) -> RepoResult<Option<Registration>> {
        let feedback = Feedback::new(feedback)?;
        let changed = self.repo.set_feedback(registration_id, feedback)?;
        if !changed {
            warn!(
                "event=feedback_record module=service status=noop registration_id={registration_id}"
            );
            return Ok(None);
        }

        info!(
            "event=feedback_record module=service status=ok registration_id={registration_id} feedback={}",
            feedback.value()
        );
        self.repo.get_registration(registration_id)
    }

    pub fn get_registration(&self, id: RegistrationId) -> RepoResult<Option<Registration>> {
        self.repo.get_registration(id)
    }

    /// Lists registrations with event title and student name, newest first.
    pub fn list_registrations(
        &self,
        query: &RegistrationListQuery,
    ) -> RepoResult<Vec<RegistrationView>> {
        self.repo.list_registrations(query)
    }
}
