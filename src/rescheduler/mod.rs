//! Optional task rescheduling
//!
//! One check cycle fetches every task, keeps the ones carrying the configured
//! label that are incomplete and overdue, and moves each of them forward.
//! Any failure aborts the cycle; the next cycle is the retry.

pub mod error;

pub use error::{CycleError, SettingsError, INVALID_API_KEY_HINT, UNAUTHORIZED_MARKER};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::ReschedulerConfig;
use crate::todoist::{Task, TaskService};

/// Wire format for due dates, both read and written
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a due date. Time-of-day is not accepted.
pub fn parse_due_date(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
}

/// Day granularity: only dates strictly before today are overdue.
pub fn is_overdue(due: NaiveDate, now: NaiveDateTime) -> bool {
    due < now.date()
}

/// Accepted range for the reschedule offset, in days
pub const RESCHEDULE_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

#[derive(Debug, Clone)]
pub struct RescheduleSettings {
    pub label: String,
    pub offset: Duration,
    pub dry_run: bool,
}

impl Default for RescheduleSettings {
    fn default() -> Self {
        Self {
            label: "optional".to_string(),
            offset: Duration::days(7),
            dry_run: false,
        }
    }
}

impl TryFrom<&ReschedulerConfig> for RescheduleSettings {
    type Error = SettingsError;

    fn try_from(config: &ReschedulerConfig) -> Result<Self, Self::Error> {
        let days = config.reschedule_days;
        if !RESCHEDULE_DAYS_RANGE.contains(&days) {
            return Err(SettingsError::OffsetOutOfRange(days));
        }
        let offset = Duration::try_days(days).ok_or(SettingsError::OffsetOutOfRange(days))?;
        Ok(Self {
            label: config.label.clone(),
            offset,
            dry_run: config.dry_run,
        })
    }
}

/// One task moved during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rescheduled {
    pub task_id: String,
    pub content: String,
    pub previous_due: NaiveDate,
    pub new_due: NaiveDate,
}

/// Outcome of a successful cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Tasks returned by the service
    pub fetched: usize,
    pub rescheduled: Vec<Rescheduled>,
    pub dry_run: bool,
}

pub struct Rescheduler<S> {
    service: S,
    settings: RescheduleSettings,
}

impl<S: TaskService> Rescheduler<S> {
    pub fn new(service: S, settings: RescheduleSettings) -> Self {
        Self { service, settings }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &RescheduleSettings {
        &self.settings
    }

    fn is_candidate(&self, task: &Task) -> bool {
        task.has_label(&self.settings.label) && task.due.is_some() && !task.is_completed
    }

    /// Run one cycle against the local wall clock
    pub async fn check_and_reschedule(&self) -> Result<CycleReport, CycleError> {
        self.check_and_reschedule_at(Local::now().naive_local()).await
    }

    /// Run one cycle as if the current moment were `now`
    pub async fn check_and_reschedule_at(
        &self,
        now: NaiveDateTime,
    ) -> Result<CycleReport, CycleError> {
        let tasks = self.service.list_tasks().await?;
        debug!("Cycle fetched {} tasks", tasks.len());

        let mut report = CycleReport {
            fetched: tasks.len(),
            rescheduled: Vec::new(),
            dry_run: self.settings.dry_run,
        };

        let new_due = now
            .checked_add_signed(self.settings.offset)
            .ok_or(CycleError::DateOverflow {
                offset_days: self.settings.offset.num_days(),
            })?
            .date();
        let new_due_str = new_due.format(DATE_FORMAT).to_string();

        for task in tasks.iter().filter(|t| self.is_candidate(t)) {
            let Some(date) = task.due_date() else {
                continue;
            };
            let due = parse_due_date(date).map_err(|source| CycleError::InvalidDueDate {
                task_id: task.id.clone(),
                date: date.to_string(),
                source,
            })?;

            if !is_overdue(due, now) {
                continue;
            }

            if self.settings.dry_run {
                println!("Would reschedule task {} to {}", task.id, new_due_str);
            } else {
                self.service.update_due_date(&task.id, &new_due_str).await?;
                println!("Rescheduled task {} to {}", task.id, new_due_str);
            }
            info!(
                task_id = %task.id,
                from = %due,
                to = %new_due,
                dry_run = self.settings.dry_run,
                "rescheduled optional task"
            );

            report.rescheduled.push(Rescheduled {
                task_id: task.id.clone(),
                content: task.content.clone(),
                previous_due: due,
                new_due,
            });
        }

        Ok(report)
    }
}

/// Print a cycle failure the way the operator expects to see it
pub fn report_cycle_error(err: &CycleError) {
    warn!(
        unauthorized = err.is_unauthorized(),
        status = ?err.status(),
        "check cycle failed: {}",
        err
    );
    for line in err.diagnostics() {
        eprintln!("{}", line);
    }
}
