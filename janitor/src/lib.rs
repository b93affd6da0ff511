pub mod cleanup;
pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod run_tracker;
pub mod scheduler;
pub mod services;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use cleanup::{CleanupExecutor, CleanupReport, PathResult, PathStatus, Trigger};
pub use clock::{Clock, SystemClock};
pub use config::{Config, FirebaseCredentials};
pub use errors::{CleanupError, ConfigError, JanitorError, StoreError};
pub use run_tracker::RunTracker;
pub use scheduler::{CleanupScheduler, ScheduleInfo};
pub use services::CleanupService;
pub use store::{DataStore, FirebaseStore};
