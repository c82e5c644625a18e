//! Interval loop around the rescheduler

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::rescheduler::{report_cycle_error, CycleReport, Rescheduler};
use crate::todoist::TaskService;

/// Consecutive failed cycles after which a louder warning is logged
const ESCALATION_THRESHOLD: u32 = 3;

/// Running tally of the cycles executed by [`run_loop`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub cycles: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub consecutive_failures: u32,
    /// Tasks moved (or, in dry-run mode, that would have been moved)
    pub rescheduled: u64,
    pub last_success: Option<DateTime<Utc>>,
}

impl LoopSummary {
    pub fn record_success(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.succeeded += 1;
        self.consecutive_failures = 0;
        self.rescheduled += report.rescheduled.len() as u64;
        self.last_success = Some(Utc::now());
    }

    pub fn record_failure(&mut self) {
        self.cycles += 1;
        self.failed += 1;
        self.consecutive_failures += 1;
    }

    pub fn needs_escalation(&self) -> bool {
        self.consecutive_failures >= ESCALATION_THRESHOLD
    }
}

/// Run check cycles every `interval` until `shutdown` resolves.
///
/// A cycle is never interrupted; `shutdown` is only observed while sleeping.
pub async fn run_loop<S, F>(
    rescheduler: &Rescheduler<S>,
    interval: Duration,
    shutdown: F,
) -> LoopSummary
where
    S: TaskService,
    F: Future<Output = ()>,
{
    let mut summary = LoopSummary::default();
    tokio::pin!(shutdown);

    loop {
        println!("Checking for overdue tasks...");

        match rescheduler.check_and_reschedule().await {
            Ok(report) => {
                debug!(
                    fetched = report.fetched,
                    rescheduled = report.rescheduled.len(),
                    "cycle finished"
                );
                summary.record_success(&report);
            }
            Err(err) => {
                report_cycle_error(&err);
                summary.record_failure();
                if summary.needs_escalation() {
                    warn!(
                        "{} consecutive check cycles have failed",
                        summary.consecutive_failures
                    );
                }
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => break,
        }
    }

    println!("Rescheduler stopped.");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rescheduler::testing::FakeService;
    use crate::rescheduler::RescheduleSettings;
    use crate::todoist::Task;
    use reqwest::StatusCode;

    #[test]
    fn test_summary_success_resets_failures() {
        let mut summary = LoopSummary::default();
        summary.record_failure();
        summary.record_failure();
        assert_eq!(summary.consecutive_failures, 2);

        summary.record_success(&CycleReport::default());
        assert_eq!(summary.cycles, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.consecutive_failures, 0);
        assert!(summary.last_success.is_some());
    }

    #[test]
    fn test_summary_escalation() {
        let mut summary = LoopSummary::default();
        for _ in 0..ESCALATION_THRESHOLD - 1 {
            summary.record_failure();
        }
        assert!(!summary.needs_escalation());
        summary.record_failure();
        assert!(summary.needs_escalation());
    }

    #[tokio::test]
    async fn test_shutdown_during_first_sleep_runs_one_cycle() {
        let service = FakeService::with_tasks(vec![Task::new("A")
            .with_label("optional")
            .with_due("2000-01-01")]);
        let r = Rescheduler::new(service, RescheduleSettings::default());

        let summary = run_loop(&r, Duration::from_secs(600), async {}).await;

        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.rescheduled, 1);
        assert_eq!(r.service().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_signal_sent_before_loop_stops_after_first_cycle() {
        let r = Rescheduler::new(FakeService::default(), RescheduleSettings::default());

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tx.send(()).unwrap();
        let shutdown = async {
            let _ = rx.await;
        };
        let summary = run_loop(&r, Duration::from_secs(600), shutdown).await;

        assert_eq!(summary.cycles, 1);
        assert_eq!(r.service().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_loop_repeats_until_shutdown() {
        let r = Rescheduler::new(FakeService::default(), RescheduleSettings::default());

        let shutdown = tokio::time::sleep(Duration::from_millis(200));
        let summary = run_loop(&r, Duration::from_millis(10), shutdown).await;

        assert!(summary.cycles >= 2, "expected several cycles, got {}", summary.cycles);
        assert_eq!(summary.failed, 0);
        assert_eq!(r.service().list_calls() as u64, summary.cycles);
    }

    #[tokio::test]
    async fn test_failed_cycles_do_not_stop_the_loop() {
        // Unauthorized on the first two fetches, then healthy
        let service = FakeService::failing_list(StatusCode::UNAUTHORIZED, "", 2);
        let r = Rescheduler::new(service, RescheduleSettings::default());

        let shutdown = tokio::time::sleep(Duration::from_millis(200));
        let summary = run_loop(&r, Duration::from_millis(10), shutdown).await;

        assert_eq!(summary.failed, 2);
        assert!(summary.succeeded >= 1);
        assert_eq!(summary.consecutive_failures, 0);
    }
}
