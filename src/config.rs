//! User configuration management

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::rescheduler::RESCHEDULE_DAYS_RANGE;
use crate::todoist::DEFAULT_BASE_URL;

const APP_DIR_NAME: &str = "optional-rescheduler";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rescheduler: ReschedulerConfig,

    #[serde(default)]
    pub todoist: TodoistConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReschedulerConfig {
    /// Label that marks a task as eligible for rescheduling
    #[serde(default = "default_label")]
    pub label: String,

    /// How far forward an overdue task is moved
    #[serde(default = "default_reschedule_days")]
    pub reschedule_days: i64,

    /// Seconds to sleep between cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ReschedulerConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            reschedule_days: default_reschedule_days(),
            interval_secs: default_interval_secs(),
            dry_run: false,
        }
    }
}

impl ReschedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn default_label() -> String {
    "optional".to_string()
}

fn default_reschedule_days() -> i64 {
    7
}

fn default_interval_secs() -> u64 {
    600
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoistConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for TodoistConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl TodoistConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Directory holding `config.toml`, e.g. `~/.config/optional-rescheduler`
pub fn get_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not find config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

impl Config {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Reject values the loop cannot run with. Checked after flag overrides.
    pub fn validate(&self) -> Result<()> {
        let days = self.rescheduler.reschedule_days;
        ensure!(
            RESCHEDULE_DAYS_RANGE.contains(&days),
            "reschedule_days must be between {} and {}, got {}",
            RESCHEDULE_DAYS_RANGE.start(),
            RESCHEDULE_DAYS_RANGE.end(),
            days
        );
        ensure!(
            self.rescheduler.interval_secs > 0,
            "interval_secs must be at least 1"
        );
        ensure!(
            self.todoist.request_timeout_secs > 0,
            "request_timeout_secs must be at least 1"
        );
        Ok(())
    }
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
