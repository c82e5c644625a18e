//! Todoist task data model

use serde::{Deserialize, Serialize};

/// Due information attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

impl Due {
    pub fn on(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }
}

/// A task as returned by `GET /tasks`
///
/// Only the fields the rescheduler consumes are modeled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub due: Option<Due>,

    #[serde(default)]
    pub is_completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            labels: Vec::new(),
            due: None,
            is_completed: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_due(mut self, date: impl Into<String>) -> Self {
        self.due = Some(Due::on(date));
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Due date string, if the task has one
    pub fn due_date(&self) -> Option<&str> {
        self.due.as_ref().map(|d| d.date.as_str())
    }
}
