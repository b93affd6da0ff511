use crate::config::FirebaseCredentials;
use crate::constants::http;
use crate::errors::StoreError;
use crate::store::{DataStore, ServiceAccountAuth};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Realtime Database client speaking the REST protocol (`<path>.json`)
pub struct FirebaseStore {
    client: Client,
    database_url: Url,
    auth: ServiceAccountAuth,
}

impl FirebaseStore {
    /// Build the client and authenticate once. Any failure here is fatal for
    /// the service, so callers should not retry.
    pub async fn connect(credentials: &FirebaseCredentials) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(http::REQUEST_TIMEOUT)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Auth {
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        let database_url = Url::parse(&credentials.database_url).map_err(|e| {
            StoreError::Backend(format!(
                "invalid database URL '{}': {}",
                credentials.database_url, e
            ))
        })?;
        if database_url.cannot_be_a_base() {
            return Err(StoreError::Backend(format!(
                "database URL '{}' cannot carry a path",
                credentials.database_url
            )));
        }

        let auth = ServiceAccountAuth::new(credentials, client.clone())?;
        auth.access_token().await?;

        info!(
            "Connected to {} as {}",
            credentials.database_url, credentials.client_email
        );

        Ok(Self {
            client,
            database_url,
            auth,
        })
    }

    /// REST resource for `path`, each segment percent-encoded
    fn path_url(&self, path: &str) -> Url {
        let path = path.trim_matches('/');
        let (parent, leaf) = path.rsplit_once('/').unwrap_or(("", path));

        let mut url = self.database_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(parent.split('/').filter(|s| !s.is_empty()))
                .push(&format!("{}.json", leaf));
        }
        url
    }

    async fn check_status(path: &str, response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::PermissionDenied {
                path: path.to_string(),
                message,
            }),
            _ => Err(StoreError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Item count of a shallow read: objects count their keys, a leaf value is
/// one item, a missing node is none.
pub fn count_children(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Object(map) => map.len() as u64,
        Value::Array(items) => items.iter().filter(|v| !v.is_null()).count() as u64,
        _ => 1,
    }
}

#[async_trait]
impl DataStore for FirebaseStore {
    #[instrument(skip(self))]
    async fn child_count(&self, path: &str) -> Result<u64, StoreError> {
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .get(self.path_url(path))
            .bearer_auth(token)
            .query(&[("shallow", "true")])
            .send()
            .await
            .map_err(|e| StoreError::Request {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let response = Self::check_status(path, response).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let count = count_children(&value);
        debug!("{} has {} children", path, count);
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .delete(self.path_url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Request {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        Self::check_status(path, response).await?;
        debug!("Removed {}", path);
        Ok(())
    }
}
