//! CLI command implementations

pub mod check;
pub mod definition;
pub mod run;

pub use definition::{Cli, Commands, GlobalArgs};

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::Config;
use crate::rescheduler::{RescheduleSettings, Rescheduler};
use crate::todoist::TodoistClient;

/// Load the config file and apply command-line overrides on top
pub fn resolve_config(args: &GlobalArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(label) = &args.label {
        config.rescheduler.label = label.clone();
    }
    if let Some(interval) = args.interval {
        config.rescheduler.interval_secs = interval;
    }
    if args.dry_run {
        config.rescheduler.dry_run = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build a rescheduler talking to Todoist.
///
/// A missing token is not fatal: every request will then be rejected as
/// unauthorized, which the cycle reports with the credential hint.
pub fn build_rescheduler(
    args: &GlobalArgs,
    config: &Config,
) -> Result<Rescheduler<TodoistClient>> {
    let token = match args.api_key.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => {
            warn!("TODOIST_API_KEY is not set");
            eprintln!("!! TODOIST_API_KEY is not set; Todoist will reject every request.");
            String::new()
        }
    };

    let client = TodoistClient::new(
        token,
        &config.todoist.base_url,
        config.todoist.request_timeout(),
    )
    .context("Failed to create Todoist client")?;
    let settings = RescheduleSettings::try_from(&config.rescheduler)
        .context("Invalid rescheduler settings")?;

    Ok(Rescheduler::new(client, settings))
}
