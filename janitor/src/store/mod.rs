//! Remote hierarchical store access
//!
//! The cleanup executor only needs two operations from the database: a
//! shallow child count for a path and a removal of the whole subtree. The
//! [`DataStore`] trait is that seam; [`FirebaseStore`] implements it over the
//! Realtime Database REST API.

pub mod auth;
pub mod firebase;

pub use auth::ServiceAccountAuth;
pub use firebase::FirebaseStore;

use crate::errors::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Number of direct children currently stored under `path`
    async fn child_count(&self, path: &str) -> Result<u64, StoreError>;

    /// Delete `path` and everything beneath it
    async fn remove(&self, path: &str) -> Result<(), StoreError>;
}
