use reqwest::StatusCode;
use thiserror::Error;

use crate::todoist::TodoistError;

/// Substring the API puts in rejected-credential responses
pub const UNAUTHORIZED_MARKER: &str = "Unauthorized";

pub const INVALID_API_KEY_HINT: &str =
    "!! Invalid API key. Ensure the env variable TODOIST_API_KEY is set correctly.";

/// Failure that aborted a whole check cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Service(#[from] TodoistError),

    #[error("Task {task_id} has an unparseable due date {date:?}: {source}")]
    InvalidDueDate {
        task_id: String,
        date: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Moving a task {offset_days} days forward overflows the calendar")]
    DateOverflow { offset_days: i64 },
}

/// Rejected rescheduler settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("reschedule_days must be between 1 and 3650, got {0}")]
    OffsetOutOfRange(i64),
}

impl CycleError {
    /// Heuristic match on the rendered message, not on the status code.
    pub fn is_unauthorized(&self) -> bool {
        self.to_string().contains(UNAUTHORIZED_MARKER)
    }

    /// HTTP status behind the failure, when there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CycleError::Service(err) => err.status(),
            _ => None,
        }
    }

    /// Lines shown to the operator, hint first when credentials look wrong
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if self.is_unauthorized() {
            lines.push(INVALID_API_KEY_HINT.to_string());
        }
        lines.push(format!("Err: {}", self));
        lines
    }
}
