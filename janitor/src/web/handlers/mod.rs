//! HTTP request handlers.
//!
//! - `cleanup` - the single endpoint: manual trigger or status page
//! - `common` - shared response types

pub mod cleanup;
pub mod common;

pub use cleanup::*;
