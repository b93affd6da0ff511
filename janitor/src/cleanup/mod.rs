//! Cleanup runs and their reports
//!
//! A run walks the configured database paths in order, removes every
//! non-empty one and records a [`PathResult`] per path. Failures on one path
//! never stop the others; the aggregate [`CleanupReport`] is successful only
//! when every path is.
//!
//! # Wire format
//!
//! Reports serialize with camelCase keys. The per-path count is exposed as
//! `itemsRemoved` for compatibility, but it is the number of children present
//! *before* the removal was issued; the removal itself is never re-counted.

pub mod executor;
pub use executor::CleanupExecutor;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// What started a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Scheduled,
    Manual,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Scheduled => write!(f, "scheduled"),
            Trigger::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: String,
    pub status: PathStatus,
    #[serde(rename = "itemsRemoved")]
    pub items_present_before_removal: u64,
    /// Milliseconds spent on this path
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl PathResult {
    pub fn succeeded(path: &str, items_present_before_removal: u64, elapsed: Duration) -> Self {
        Self {
            path: path.to_string(),
            status: PathStatus::Success,
            items_present_before_removal,
            duration_ms: elapsed.as_millis() as u64,
            error: None,
        }
    }

    pub fn failed(path: &str, error: String, elapsed: Duration) -> Self {
        Self {
            path: path.to_string(),
            status: PathStatus::Failed,
            items_present_before_removal: 0,
            duration_ms: elapsed.as_millis() as u64,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PathStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub success: bool,
    pub run_id: Uuid,
    pub trigger: Trigger,
    /// Start of the run in the configured timezone
    pub timestamp: DateTime<FixedOffset>,
    /// Total milliseconds for the run
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub timezone: String,
    pub results: Vec<PathResult>,
}

impl CleanupReport {
    pub fn failed_paths(&self) -> impl Iterator<Item = &PathResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Sum of children present across successfully cleaned paths
    pub fn total_items_present_before_removal(&self) -> u64 {
        self.results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.items_present_before_removal)
            .sum()
    }
}
