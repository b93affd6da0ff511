pub mod cleanup_service;

pub use cleanup_service::CleanupService;
