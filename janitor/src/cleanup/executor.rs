use crate::clock::Clock;
use crate::cleanup::{CleanupReport, PathResult, Trigger};
use crate::errors::{CleanupError, StoreError};
use crate::store::DataStore;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Sweeps the configured paths once per call.
///
/// The executor does no logging; it only computes the report. Callers decide
/// what to log and how to surface failures.
pub struct CleanupExecutor {
    store: Arc<dyn DataStore>,
    targets: Vec<String>,
    timezone: Tz,
    clock: Arc<dyn Clock>,
}

impl CleanupExecutor {
    pub fn new<I, S>(
        store: Arc<dyn DataStore>,
        targets: I,
        timezone: Tz,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            store,
            targets: targets.into_iter().map(Into::into).collect(),
            timezone,
            clock,
        }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Run one best-effort sweep over every target, in order.
    ///
    /// Store failures are recorded per path. Only an unusable target list is
    /// returned as an error, and in that case the store is never touched.
    pub async fn run(&self, trigger: Trigger) -> Result<CleanupReport, CleanupError> {
        let paths = self.validated_targets()?;

        let started = Instant::now();
        let timestamp = self.clock.now().with_timezone(&self.timezone);

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.clean_path(path).await);
        }

        Ok(CleanupReport {
            success: results.iter().all(PathResult::is_success),
            run_id: Uuid::new_v4(),
            trigger,
            timestamp: timestamp.fixed_offset(),
            duration_ms: started.elapsed().as_millis() as u64,
            timezone: self.timezone.name().to_string(),
            results,
        })
    }

    async fn clean_path(&self, path: &str) -> PathResult {
        let started = Instant::now();

        match self.remove_if_populated(path).await {
            Ok(count) => PathResult::succeeded(path, count, started.elapsed()),
            Err(e) => PathResult::failed(path, e.to_string(), started.elapsed()),
        }
    }

    /// Returns the child count seen before removal. Empty paths skip the write.
    async fn remove_if_populated(&self, path: &str) -> Result<u64, StoreError> {
        let count = self.store.child_count(path).await?;
        if count > 0 {
            self.store.remove(path).await?;
        }
        Ok(count)
    }

    fn validated_targets(&self) -> Result<Vec<&str>, CleanupError> {
        if self.targets.is_empty() {
            return Err(CleanupError::InvalidTarget {
                reason: "no cleanup paths configured".to_string(),
            });
        }

        self.targets
            .iter()
            .map(|target| {
                let path = target.trim().trim_matches('/');
                if path.is_empty() {
                    Err(CleanupError::InvalidTarget {
                        reason: format!("'{}' does not name a database path", target),
                    })
                } else {
                    Ok(path)
                }
            })
            .collect()
    }
}
