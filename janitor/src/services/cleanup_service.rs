use crate::cleanup::{CleanupExecutor, CleanupReport, Trigger};
use crate::clock::Clock;
use crate::errors::CleanupError;
use crate::run_tracker::RunTracker;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info, instrument, warn, Instrument, Span};

/// Single entry point for cleanup runs, shared by the scheduler and the web
/// handler. Owns the run guard and does all logging for a run.
pub struct CleanupService {
    executor: Arc<CleanupExecutor>,
    tracker: Arc<RunTracker>,
    clock: Arc<dyn Clock>,
}

impl CleanupService {
    pub fn new(executor: CleanupExecutor, tracker: Arc<RunTracker>, clock: Arc<dyn Clock>) -> Self {
        Self {
            executor: Arc::new(executor),
            tracker,
            clock,
        }
    }

    /// Run one sweep, refusing to start while another sweep is in progress.
    ///
    /// The sweep runs on its own task: dropping the returned future (a client
    /// disconnecting mid-request) does not cut it short, and the run slot is
    /// released when the task ends however it ends.
    #[instrument(skip(self))]
    pub async fn run(&self, trigger: Trigger) -> Result<CleanupReport, CleanupError> {
        let guard = self.tracker.try_start(trigger, self.clock.now())?;

        let executor = Arc::clone(&self.executor);
        let clock = Arc::clone(&self.clock);

        let sweep = async move {
            info!(
                "🧹 Starting {} cleanup of {} paths: {}",
                trigger,
                executor.targets().len(),
                executor.targets().join(", ")
            );

            let outcome = executor.run(trigger).await;

            match &outcome {
                Ok(report) => {
                    log_report(report);
                    guard.finish(report.success, None, clock.now());
                }
                Err(e) => {
                    error!("✗ {} cleanup aborted: {}", trigger, e);
                    guard.finish(false, Some(e.to_string()), clock.now());
                }
            }

            outcome
        };

        tokio::spawn(sweep.instrument(Span::current()))
            .await
            .map_err(|e| {
                error!("✗ {} cleanup task failed: {}", trigger, e);
                CleanupError::Interrupted {
                    reason: e.to_string(),
                }
            })?
    }

    pub fn targets(&self) -> &[String] {
        self.executor.targets()
    }

    pub fn timezone(&self) -> Tz {
        self.executor.timezone()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn tracker(&self) -> &Arc<RunTracker> {
        &self.tracker
    }
}

fn log_report(report: &CleanupReport) {
    for result in &report.results {
        match &result.error {
            None => info!(
                "✓ {}: {} items present before removal ({}ms)",
                result.path, result.items_present_before_removal, result.duration_ms
            ),
            Some(e) => warn!("✗ {}: {} ({}ms)", result.path, e, result.duration_ms),
        }
    }

    if report.success {
        info!(
            "✓ Cleanup {} completed in {}ms ({} items across {} paths)",
            report.run_id,
            report.duration_ms,
            report.total_items_present_before_removal(),
            report.results.len()
        );
    } else {
        error!(
            "✗ Cleanup {} finished with {} failed paths in {}ms",
            report.run_id,
            report.failed_paths().count(),
            report.duration_ms
        );
    }
}
