// Common types for API handlers

use axum::{http::StatusCode, response::Json};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Body returned when a manual run could not produce a report
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
}

impl ErrorResponse {
    /// `now` is stamped in the same timezone as cleanup reports
    pub fn new(error: String, now: DateTime<Tz>) -> Self {
        Self {
            success: false,
            error,
            timestamp: now.to_rfc3339(),
        }
    }
}

pub type ErrorReply = (StatusCode, Json<ErrorResponse>);
