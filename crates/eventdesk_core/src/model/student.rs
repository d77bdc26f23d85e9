//! Student domain model.
//!
//! # Invariants
//! - `name`, `email` and `college_id` are never blank.
//! - `email` is unique across all students (enforced by the store).

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type StudentId = i64;

/// Persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub college_id: String,
}

/// Write-side input for student creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub college_id: String,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        college_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            college_id: college_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("college_id", &self.college_id)?;
        Ok(())
    }
}
