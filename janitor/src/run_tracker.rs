//! Run tracking for cleanup sweeps
//!
//! Keeps the single active run (if any) and the most recently finished one.
//! Starting a run while another is active is refused, so the scheduled job
//! and a manual trigger can never issue removals against the same paths at
//! the same time.
//!
//! Claiming the slot hands back a [`RunGuard`]. The slot is released when the
//! guard is finished or dropped, so a cancelled or panicking run can never
//! leave the tracker busy.
//!
//! # Usage
//!
//! ```ignore
//! let guard = tracker.try_start(Trigger::Manual, clock.now())?;
//!
//! // Perform the sweep...
//!
//! guard.finish(true, None, clock.now());
//! ```

use crate::cleanup::Trigger;
use crate::errors::CleanupError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRun {
    pub trigger: Trigger,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub trigger: Trigger,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub error: Option<String>,
}

/// Std mutexes: the guard releases the slot from `Drop`, which cannot await.
/// Critical sections are a few field writes and never span an await.
#[derive(Debug, Default)]
pub struct RunTracker {
    active: Mutex<Option<ActiveRun>>,
    last: Mutex<Option<RunRecord>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the run slot. Returns an error if another run holds it.
    #[instrument(skip(self, now))]
    pub fn try_start(
        self: &Arc<Self>,
        trigger: Trigger,
        now: DateTime<Utc>,
    ) -> Result<RunGuard, CleanupError> {
        let mut active = lock(&self.active);

        if let Some(current) = active.as_ref() {
            warn!(
                "Refusing {} cleanup: {} run in progress since {}",
                trigger,
                current.trigger,
                current.started_at.to_rfc3339()
            );
            return Err(CleanupError::AlreadyRunning {
                trigger: current.trigger.to_string(),
                started_at: current.started_at,
            });
        }

        *active = Some(ActiveRun {
            trigger,
            started_at: now,
        });

        Ok(RunGuard {
            tracker: Arc::clone(self),
            run: Some(ActiveRun {
                trigger,
                started_at: now,
            }),
        })
    }

    pub fn active_run(&self) -> Option<ActiveRun> {
        lock(&self.active).clone()
    }

    pub fn last_run(&self) -> Option<RunRecord> {
        lock(&self.last).clone()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.active).is_some()
    }

    fn release(&self) {
        lock(&self.active).take();
    }
}

/// Holds the run slot for one sweep
#[derive(Debug)]
pub struct RunGuard {
    tracker: Arc<RunTracker>,
    run: Option<ActiveRun>,
}

impl RunGuard {
    /// Release the run slot and remember the outcome
    pub fn finish(mut self, success: bool, error: Option<String>, now: DateTime<Utc>) {
        let Some(run) = self.run.take() else {
            return;
        };

        let record = RunRecord {
            trigger: run.trigger,
            started_at: run.started_at,
            finished_at: now,
            success,
            error,
        };

        info!(
            "Finished {} cleanup (took {}ms, success: {})",
            record.trigger,
            (record.finished_at - record.started_at).num_milliseconds(),
            record.success
        );

        *lock(&self.tracker.last) = Some(record);
        self.tracker.release();
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            warn!(
                "{} cleanup started at {} ended without finishing; releasing run slot",
                run.trigger,
                run.started_at.to_rfc3339()
            );
            self.tracker.release();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
