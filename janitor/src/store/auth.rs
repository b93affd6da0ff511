//! OAuth2 access tokens for a Google service account.
//!
//! A short-lived RS256 assertion signed with the service account key is
//! exchanged at the token endpoint for a bearer token. Tokens are cached and
//! refreshed a few minutes before they expire.

use crate::config::FirebaseCredentials;
use crate::constants::auth;
use crate::errors::StoreError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct ServiceAccountAuth {
    client: Client,
    client_email: String,
    token_uri: String,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// Parse the private key; fails when the PEM is not a usable RSA key
    pub fn new(credentials: &FirebaseCredentials, client: Client) -> Result<Self, StoreError> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes()).map_err(|e| {
            StoreError::Auth {
                reason: format!("unable to parse service account private key: {}", e),
            }
        })?;

        Ok(Self {
            client,
            client_email: credentials.client_email.clone(),
            token_uri: credentials.token_uri.clone(),
            key,
            cached: Mutex::new(None),
        })
    }

    /// Current bearer token, fetching a new one when the cached token is stale
    pub async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            let refresh_at =
                token.expires_at - Duration::seconds(auth::TOKEN_REFRESH_MARGIN_SECONDS);
            if Utc::now() < refresh_at {
                return Ok(token.value.clone());
            }
            debug!("Access token expires at {}, refreshing", token.expires_at);
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken, StoreError> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: auth::SCOPES,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + auth::ASSERTION_LIFETIME_SECONDS,
        };

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key).map_err(|e| {
            StoreError::Auth {
                reason: format!("unable to sign token assertion: {}", e),
            }
        })?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", auth::GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Auth {
                reason: format!("token request to {} failed: {}", self.token_uri, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                reason: format!("token endpoint returned {}: {}", status, body),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| StoreError::Auth {
            reason: format!("unreadable token response: {}", e),
        })?;

        info!(
            "Obtained access token for {} (valid for {}s)",
            self.client_email, token.expires_in
        );

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
