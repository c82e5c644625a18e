//! `optional-rescheduler check` command implementation

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use super::{build_rescheduler, resolve_config, GlobalArgs};
use crate::rescheduler::{report_cycle_error, CycleReport, DATE_FORMAT};

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Print the cycle report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RescheduledJson {
    id: String,
    content: String,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct ReportJson {
    fetched: usize,
    dry_run: bool,
    rescheduled: Vec<RescheduledJson>,
}

impl From<&CycleReport> for ReportJson {
    fn from(report: &CycleReport) -> Self {
        Self {
            fetched: report.fetched,
            dry_run: report.dry_run,
            rescheduled: report
                .rescheduled
                .iter()
                .map(|r| RescheduledJson {
                    id: r.task_id.clone(),
                    content: r.content.clone(),
                    from: r.previous_due.format(DATE_FORMAT).to_string(),
                    to: r.new_due.format(DATE_FORMAT).to_string(),
                })
                .collect(),
        }
    }
}

pub async fn run(global: &GlobalArgs, args: CheckArgs) -> Result<()> {
    let config = resolve_config(global)?;
    let rescheduler = build_rescheduler(global, &config)?;

    if !args.json {
        println!("Checking for overdue tasks...");
    }

    let report = match rescheduler.check_and_reschedule().await {
        Ok(report) => report,
        Err(err) => {
            report_cycle_error(&err);
            bail!("Check cycle failed");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ReportJson::from(&report))?);
    } else if report.rescheduled.is_empty() {
        println!("No overdue tasks among {} fetched.", report.fetched);
    } else {
        let verb = if report.dry_run { "would be" } else { "were" };
        println!(
            "{} of {} tasks {} rescheduled.",
            report.rescheduled.len(),
            report.fetched,
            verb
        );
    }

    Ok(())
}
