//! `optional-rescheduler run` command implementation

use anyhow::Result;
use tokio::sync::oneshot;
use tracing::info;

use super::{build_rescheduler, resolve_config, GlobalArgs};
use crate::schedule;

pub async fn run(args: &GlobalArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let rescheduler = build_rescheduler(args, &config)?;
    let interval = config.rescheduler.interval();

    println!("Starting rescheduler...");
    if config.rescheduler.dry_run {
        println!("Dry run: tasks will be reported, not updated.");
    }
    info!(
        label = %config.rescheduler.label,
        interval_secs = config.rescheduler.interval_secs,
        "rescheduler started"
    );

    // Install the Ctrl-C handler before the first cycle so an early SIGINT
    // is not lost while that cycle is in flight.
    let (stop_tx, stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(());
        }
    });
    tokio::task::yield_now().await;

    let shutdown = async {
        // Handler could not be installed: run until killed
        if stop_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let summary = schedule::run_loop(&rescheduler, interval, shutdown).await;
    info!(
        cycles = summary.cycles,
        failed = summary.failed,
        rescheduled = summary.rescheduled,
        last_success = ?summary.last_success,
        "rescheduler stopped"
    );
    Ok(())
}
