//! Central repository for compile-time configuration
//!
//! The schedule, its timezone and the list of cleanup targets are fixed at
//! build time. Only credentials and the bind address come from the
//! environment (see [`crate::config`]).

use std::time::Duration;

/// Cleanup schedule constants
pub mod schedule {
    /// 6-field cron expression (sec min hour day month dow): daily at midnight
    pub const CRON: &str = "0 0 0 * * *";

    /// IANA timezone the schedule fires in and reports are stamped with
    pub const TIMEZONE: &str = "America/New_York";
}

/// Database paths removed on every run, in order
pub mod targets {
    pub const CLEANUP_PATHS: &[&str] = &["chats", "players"];
}

/// HTTP client constants for the Realtime Database REST API
pub mod http {
    use super::Duration;

    /// Timeout for a single REST or token request
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Timeout for establishing connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Google service-account authentication constants
pub mod auth {
    pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

    /// Scopes required by the Realtime Database REST API
    pub const SCOPES: &str =
        "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";

    pub const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

    /// Lifetime requested for the signed assertion (Google caps it at one hour)
    pub const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

    /// Tokens are refreshed this long before they expire
    pub const TOKEN_REFRESH_MARGIN_SECONDS: i64 = 300;
}

/// Web server defaults
pub mod web {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;

    /// Query value that turns a request into a manual cleanup
    pub const MANUAL_TRIGGER: &str = "manual";
}
