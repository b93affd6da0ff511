//! Stand-ins for the live scheduler and the system clock

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use janitor::{Clock, ScheduleInfo};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 2026-10-16 11:30:00 in New York
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 15, 30, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct FakeSchedule {
    pub next: Option<DateTime<Utc>>,
    pub timezone: Tz,
    lookups: AtomicUsize,
}

impl FakeSchedule {
    /// Next firing at the coming New York midnight
    pub fn midnight() -> Self {
        Self {
            next: Some(Utc.with_ymd_and_hms(2026, 10, 17, 4, 0, 0).unwrap()),
            timezone: chrono_tz::America::New_York,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduleInfo for FakeSchedule {
    fn schedule(&self) -> &str {
        "0 0 0 * * *"
    }

    fn timezone(&self) -> Tz {
        self.timezone
    }

    async fn next_run(&self) -> Option<DateTime<Utc>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.next
    }
}
