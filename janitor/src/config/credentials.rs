//! Service-account credentials for the Realtime Database.
//!
//! Credentials are read from environment variables at startup. The private
//! key is usually stored with literal `\n` sequences (the format produced by
//! copying a JSON key file into a single-line variable), so those are turned
//! back into newlines before the PEM is used.

use crate::constants::auth;
use crate::errors::ConfigError;
use reqwest::Url;
use std::fmt;

pub const PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";
pub const CLIENT_EMAIL_VAR: &str = "FIREBASE_CLIENT_EMAIL";
pub const PRIVATE_KEY_VAR: &str = "FIREBASE_PRIVATE_KEY";
pub const DATABASE_URL_VAR: &str = "FIREBASE_DATABASE_URL";
pub const TOKEN_URI_VAR: &str = "FIREBASE_TOKEN_URI";

#[derive(Clone)]
pub struct FirebaseCredentials {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    /// Database root, without a trailing slash
    pub database_url: String,
    pub token_uri: String,
}

impl FirebaseCredentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |field: &str| -> Result<String, ConfigError> {
            lookup(field)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingRequired {
                    field: field.to_string(),
                })
        };

        let project_id = required(PROJECT_ID_VAR)?;
        let client_email = required(CLIENT_EMAIL_VAR)?;
        let private_key = normalize_private_key(&required(PRIVATE_KEY_VAR)?)?;
        let database_url = validate_url(DATABASE_URL_VAR, &required(DATABASE_URL_VAR)?)?;
        let token_uri = match lookup(TOKEN_URI_VAR).filter(|v| !v.trim().is_empty()) {
            Some(uri) => validate_url(TOKEN_URI_VAR, &uri)?,
            None => auth::DEFAULT_TOKEN_URI.to_string(),
        };

        if !client_email.contains('@') {
            return Err(ConfigError::InvalidValue {
                field: CLIENT_EMAIL_VAR.to_string(),
                reason: format!("'{}' is not an email address", client_email),
            });
        }

        Ok(Self {
            project_id,
            client_email,
            private_key,
            database_url,
            token_uri,
        })
    }
}

// Never print the key material.
impl fmt::Debug for FirebaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn normalize_private_key(raw: &str) -> Result<String, ConfigError> {
    let key = raw.trim_matches('"').replace("\\n", "\n");
    if !key.contains("-----BEGIN") || !key.contains("PRIVATE KEY-----") {
        return Err(ConfigError::InvalidValue {
            field: PRIVATE_KEY_VAR.to_string(),
            reason: "expected a PEM encoded private key".to_string(),
        });
    }
    Ok(key)
}

fn validate_url(field: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{}' is not a valid URL: {}", raw, e),
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
