use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use janitor::constants::{schedule, targets};
use janitor::web::{start_web_server, AppState};
use janitor::{
    CleanupExecutor, CleanupScheduler, CleanupService, Clock, Config, FirebaseStore,
    JanitorError, RunTracker, SystemClock,
};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("janitor=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting game data janitor");

    let timezone: Tz = schedule::TIMEZONE
        .parse()
        .map_err(|e| anyhow!("Invalid timezone '{}': {}", schedule::TIMEZONE, e))?;

    // Credentials and the initial token exchange must succeed before anything is served
    let (config, store) = match connect().await {
        Ok(connected) => connected,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e.into());
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tracker = Arc::new(RunTracker::new());

    let executor = CleanupExecutor::new(
        Arc::new(store),
        targets::CLEANUP_PATHS.iter().copied(),
        timezone,
        clock.clone(),
    );
    let cleanup_service = Arc::new(CleanupService::new(executor, tracker, clock.clone()));
    info!(
        "Cleanup service initialized for paths: {}",
        targets::CLEANUP_PATHS.join(", ")
    );

    let scheduler = Arc::new(
        CleanupScheduler::new(cleanup_service.clone(), schedule::CRON, timezone).await?,
    );
    scheduler.start().await?;

    let state = AppState::new(cleanup_service, scheduler.clone(), clock);
    let served = start_web_server(&config, state, shutdown_signal()).await;

    if let Err(e) = scheduler.shutdown().await {
        warn!("Scheduler did not stop cleanly: {}", e);
    }

    served?;
    info!("Shutdown complete");
    Ok(())
}

async fn connect() -> Result<(Config, FirebaseStore), JanitorError> {
    let config = Config::from_env()?;
    let store = FirebaseStore::connect(&config.firebase).await?;
    Ok((config, store))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping scheduler and server");
}
