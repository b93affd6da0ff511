//! In-memory store for exercising the executor without a database
//!
//! Tracks every call so tests can assert that empty paths never see a
//! remove, and can inject failures per path and per operation.

use async_trait::async_trait;
use janitor::{DataStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Lets a test hold a run inside the store until it is released
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockStore {
    children: Mutex<HashMap<String, u64>>,
    count_failures: HashMap<String, String>,
    remove_failures: HashMap<String, String>,
    count_calls: AtomicUsize,
    removed: Mutex<Vec<String>>,
    gate: Option<Arc<Gate>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(self, path: &str, count: u64) -> Self {
        self.children
            .lock()
            .unwrap()
            .insert(path.to_string(), count);
        self
    }

    pub fn failing_count(mut self, path: &str, message: &str) -> Self {
        self.count_failures
            .insert(path.to_string(), message.to_string());
        self
    }

    pub fn failing_remove(mut self, path: &str, message: &str) -> Self {
        self.remove_failures
            .insert(path.to_string(), message.to_string());
        self
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.removed.lock().unwrap().len()
    }

    pub fn removed_paths(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    pub fn children_of(&self, path: &str) -> u64 {
        self.children
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DataStore for MockStore {
    async fn child_count(&self, path: &str) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if let Some(message) = self.count_failures.get(path) {
            return Err(StoreError::Backend(message.clone()));
        }

        Ok(self.children_of(path))
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        // Failed removes are recorded too: the call was issued
        self.removed.lock().unwrap().push(path.to_string());

        if let Some(message) = self.remove_failures.get(path) {
            return Err(StoreError::Backend(message.clone()));
        }

        self.children.lock().unwrap().remove(path);
        Ok(())
    }
}
