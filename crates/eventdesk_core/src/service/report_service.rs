//! Reporting use-cases.

use crate::model::report::{
    EventAttendance, EventFeedback, EventRegistrationCount, ReportBundle, StudentActivity,
};
use crate::repo::report_repo::ReportRepository;
use crate::repo::RepoResult;
use log::debug;

/// Number of students returned by `top_students` when the caller gives no limit.
pub const DEFAULT_TOP_STUDENTS_LIMIT: u32 = 3;

/// Read-only facade over the report queries.
pub struct ReportService<R: ReportRepository> {
    repo: R,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registrations per event, busiest first.
    pub fn registration_counts(&self) -> RepoResult<Vec<EventRegistrationCount>> {
        self.repo.registration_counts()
    }

    /// Attendance percentage per event, highest first.
    pub fn attendance_rates(&self) -> RepoResult<Vec<EventAttendance>> {
        self.repo.attendance_rates()
    }

    /// Average rating per event; events without any rating are left out.
    pub fn average_feedback(&self) -> RepoResult<Vec<EventFeedback>> {
        self.repo.average_feedback()
    }

    /// Most active students; `None` uses [`DEFAULT_TOP_STUDENTS_LIMIT`].
    pub fn top_students(&self, limit: Option<u32>) -> RepoResult<Vec<StudentActivity>> {
        self.repo
            .top_students(limit.unwrap_or(DEFAULT_TOP_STUDENTS_LIMIT))
    }

    /// All four views from a single consistent read.
    pub fn summary(&self, top_students_limit: Option<u32>) -> RepoResult<ReportBundle> {
        let limit = top_students_limit.unwrap_or(DEFAULT_TOP_STUDENTS_LIMIT);
        let bundle = self.repo.report_bundle(limit)?;
        debug!(
            "event=report_summary module=service status=ok events={} students={}",
            bundle.registrations.len(),
            bundle.top_students.len()
        );
        Ok(bundle)
    }
}
