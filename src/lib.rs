//! Optional Rescheduler library - keeps "optional" Todoist tasks from piling up as overdue

pub mod cli;
pub mod config;
pub mod rescheduler;
pub mod schedule;
pub mod todoist;
