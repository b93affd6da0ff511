pub mod credentials;

pub use credentials::FirebaseCredentials;

use crate::constants::web;
use crate::errors::ConfigError;
use tracing::info;

pub const HOST_VAR: &str = "JANITOR_HOST";
pub const PORT_VAR: &str = "JANITOR_PORT";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub firebase: FirebaseCredentials,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| web::DEFAULT_HOST.to_string());

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: PORT_VAR.to_string(),
                    reason: format!("'{}' is not a valid port: {}", raw, e),
                })?,
            None => web::DEFAULT_PORT,
        };

        let firebase = FirebaseCredentials::from_lookup(&lookup)?;

        info!(
            "Configuration loaded: project '{}', database {}, listening on {}:{}",
            firebase.project_id, firebase.database_url, host, port
        );

        Ok(Self {
            host,
            port,
            firebase,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
