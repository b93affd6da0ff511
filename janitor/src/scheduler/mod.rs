//! Cron-based scheduling for the cleanup sweep
//!
//! One job is registered: the cleanup of every configured path, fired by a
//! 6-field cron expression (sec min hour day month dow) evaluated in a named
//! timezone. A failed run is logged and the schedule carries on.
//!
//! The web layer only needs to read schedule state, so it depends on the
//! [`ScheduleInfo`] trait rather than on [`CleanupScheduler`] itself.

pub mod cron;
pub mod job;

pub use job::CleanupScheduler;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

#[async_trait]
pub trait ScheduleInfo: Send + Sync {
    /// Cron expression the job fires on
    fn schedule(&self) -> &str;

    fn timezone(&self) -> Tz;

    /// Next firing time, `None` when the job is not registered
    async fn next_run(&self) -> Option<DateTime<Utc>>;
}
