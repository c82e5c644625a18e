//! Todoist integration module
//!
//! This module provides the pieces needed to talk to the Todoist REST API:
//! - Task wire types
//! - The `TaskService` seam used by the rescheduler
//! - A reqwest-backed client

pub mod client;
pub mod error;
pub mod model;

pub use client::{TaskService, TodoistClient, DEFAULT_BASE_URL};
pub use error::TodoistError;
pub use model::{Due, Task};
