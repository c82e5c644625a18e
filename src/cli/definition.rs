//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::check::CheckArgs;

#[derive(Parser)]
#[command(name = "optional-rescheduler")]
#[command(version, about = "Move overdue Todoist tasks labeled \"optional\" one week forward")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Todoist API token
    #[arg(long, env = "TODOIST_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report which tasks would move without updating them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Seconds between check cycles
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: Option<u64>,

    /// Label that marks a task as optional
    #[arg(long, global = true)]
    pub label: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check for overdue optional tasks every interval (default)
    Run,

    /// Run a single check cycle and exit
    Check(CheckArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
