//! Environment-driven runtime settings.
//!
//! # Responsibility
//! - Resolve database path and logging options from `EVENTDESK_*` variables.
//!
//! # Invariants
//! - Blank environment values count as unset.
//! - Resolution never fails; invalid log levels are reported by
//!   `init_logging`, not here.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "EVENTDESK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "EVENTDESK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "EVENTDESK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "eventdesk.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
