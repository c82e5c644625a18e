//! Todoist REST client

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::error::{Result, TodoistError};
use super::model::Task;

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Operations the rescheduler needs from a task service.
pub trait TaskService {
    /// Fetch every active task in the account.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Set a task's due date. `date` is `YYYY-MM-DD`.
    fn update_due_date(&self, task_id: &str, date: &str)
        -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Serialize)]
struct UpdateDueDate<'a> {
    due_date: &'a str,
}

/// Client for the Todoist REST API
#[derive(Debug, Clone)]
pub struct TodoistClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    /// Create a client against `base_url` with the given request timeout
    pub fn new(token: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TodoistError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("optional-rescheduler/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            token: token.into(),
        })
    }

    /// Create a client against the public Todoist API
    pub fn with_default_url(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::new(token, DEFAULT_BASE_URL, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TodoistError::Http { status, body })
    }
}

impl TaskService for TodoistClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = format!("{}/tasks", self.base_url);
        debug!("GET {}", url);

        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let tasks: Vec<Task> = Self::check(response).await?.json().await?;

        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn update_due_date(&self, task_id: &str, date: &str) -> Result<()> {
        let url = format!("{}/tasks/{}", self.base_url, task_id);
        debug!("POST {} due_date={}", url, date);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&UpdateDueDate { due_date: date })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
