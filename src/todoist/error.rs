use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoistError {
    /// The API answered with a non-success status. The status is rendered
    /// with its canonical reason, e.g. `401 Unauthorized`.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Request to Todoist failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid Todoist base URL: {0}")]
    InvalidBaseUrl(String),
}

impl TodoistError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TodoistError::Http { status, .. } => Some(*status),
            TodoistError::Request(err) => err.status(),
            TodoistError::InvalidBaseUrl(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoistError>;
