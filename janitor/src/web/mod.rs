pub mod handlers;
pub mod server;
pub mod status_page;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::clock::Clock;
use crate::scheduler::ScheduleInfo;
use crate::services::CleanupService;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cleanup_service: Arc<CleanupService>,
    pub schedule: Arc<dyn ScheduleInfo>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        cleanup_service: Arc<CleanupService>,
        schedule: Arc<dyn ScheduleInfo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cleanup_service,
            schedule,
            clock,
        }
    }
}
