use crate::cleanup::Trigger;
use crate::errors::CleanupError;
use crate::scheduler::{cron::validate_6_field_cron, ScheduleInfo};
use crate::services::CleanupService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub struct CleanupScheduler {
    service: Arc<CleanupService>,
    schedule: String,
    timezone: Tz,
    scheduler: JobScheduler,
    job_id: RwLock<Option<Uuid>>,
}

impl CleanupScheduler {
    pub async fn new(service: Arc<CleanupService>, schedule: &str, timezone: Tz) -> Result<Self> {
        validate_6_field_cron(schedule)
            .map_err(|e| anyhow!("Invalid 6-field cron schedule '{}': {}", schedule, e))?;

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            service,
            schedule: schedule.to_string(),
            timezone,
            scheduler,
            job_id: RwLock::new(None),
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        let mut job_id = self.job_id.write().await;
        if job_id.is_some() {
            warn!("Cleanup scheduler already started");
            return Ok(());
        }

        let service = self.service.clone();
        let timezone = self.timezone;

        let job = Job::new_async_tz(self.schedule.as_str(), timezone, move |_uuid, _scheduler| {
            let service = service.clone();

            Box::pin(async move {
                info!(
                    "🕛 Scheduled cleanup fired at {}",
                    service.clock().now().with_timezone(&timezone).to_rfc3339()
                );
                run_scheduled(&service).await;
            })
        })
        .map_err(|e| anyhow!("Failed to create cleanup job for '{}': {}", self.schedule, e))?;

        let id = self
            .scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add cleanup job to scheduler: {}", e))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;

        *job_id = Some(id);
        info!(
            "✓ Cleanup scheduled: '{}' ({})",
            self.schedule,
            self.timezone.name()
        );
        Ok(())
    }

    /// Stop firing. A run already in progress is left to finish on its own.
    pub async fn shutdown(&self) -> Result<()> {
        if self.job_id.write().await.take().is_none() {
            return Ok(());
        }

        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to shut down scheduler: {}", e))?;

        info!("Cleanup scheduler stopped");
        Ok(())
    }
}

/// Body of each firing. Errors end here so the schedule keeps running.
pub async fn run_scheduled(service: &CleanupService) {
    match service.run(Trigger::Scheduled).await {
        Ok(report) if report.success => {
            info!("✓ Scheduled cleanup {} succeeded", report.run_id);
        }
        Ok(report) => {
            warn!(
                "Scheduled cleanup {} finished with failures; next firing unaffected",
                report.run_id
            );
        }
        Err(CleanupError::AlreadyRunning { trigger, .. }) => {
            warn!("Skipping scheduled cleanup: {} run still in progress", trigger);
        }
        Err(e) => {
            error!("✗ Scheduled cleanup failed: {}", e);
        }
    }
}

#[async_trait]
impl ScheduleInfo for CleanupScheduler {
    fn schedule(&self) -> &str {
        &self.schedule
    }

    fn timezone(&self) -> Tz {
        self.timezone
    }

    async fn next_run(&self) -> Option<DateTime<Utc>> {
        let id = (*self.job_id.read().await)?;
        let mut scheduler = self.scheduler.clone();

        match scheduler.next_tick_for_job(id).await {
            Ok(next) => next,
            Err(e) => {
                warn!("Unable to read next cleanup time: {}", e);
                None
            }
        }
    }
}
