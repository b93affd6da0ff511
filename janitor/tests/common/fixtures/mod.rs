//! Shared test fixtures
//!
//! This module provides reusable test utilities:
//! - In-memory mock store with call tracking and failure injection
//! - Fake schedule and fixed clock for the web layer
//! - Mock Realtime Database / token endpoint (wiremock)
//! - Common test data

// Allow unused code in test fixtures - each test binary uses a subset
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fake_schedule;
pub mod mock_firebase;
pub mod mock_store;
pub mod test_data;

pub use fake_schedule::{FakeSchedule, FixedClock};
pub use mock_firebase::MockFirebase;
pub use mock_store::{Gate, MockStore};
pub use test_data::*;

use chrono_tz::Tz;
use janitor::{CleanupExecutor, CleanupService, RunTracker};
use std::sync::Arc;

pub const TIMEZONE: Tz = chrono_tz::America::New_York;

/// Build a service over `store` with a fixed clock
pub fn service_for(store: Arc<MockStore>, targets: &[&str]) -> Arc<CleanupService> {
    let clock = Arc::new(FixedClock::default());
    let executor = CleanupExecutor::new(store, targets.iter().copied(), TIMEZONE, clock.clone());
    Arc::new(CleanupService::new(
        executor,
        Arc::new(RunTracker::new()),
        clock,
    ))
}
