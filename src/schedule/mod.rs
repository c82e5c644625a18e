//! Polling schedule
//!
//! Drives the rescheduler on a fixed interval until a shutdown signal.

pub mod poller;

pub use poller::{run_loop, LoopSummary};
