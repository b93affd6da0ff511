//! Mock Realtime Database REST API and OAuth2 token endpoint
//!
//! Both live on one wiremock server: `/token` answers the service-account
//! exchange, `/<path>.json` answers shallow reads and deletes.

use super::test_data::credentials;
use janitor::FirebaseCredentials;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub struct MockFirebase {
    pub server: MockServer,
}

impl MockFirebase {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn credentials(&self) -> FirebaseCredentials {
        FirebaseCredentials {
            project_id: credentials::PROJECT_ID.to_string(),
            client_email: credentials::CLIENT_EMAIL.to_string(),
            private_key: credentials::PRIVATE_KEY_PEM.to_string(),
            database_url: self.server.uri(),
            token_uri: format!("{}/token", self.server.uri()),
        }
    }

    /// Accept the JWT-bearer grant and hand out a one-hour token
    pub async fn mock_token(&self) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
            .and(body_string_contains("assertion="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": credentials::ACCESS_TOKEN,
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_token_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid JWT Signature."
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer a shallow read of `db_path` with `body`
    pub async fn mock_shallow(&self, db_path: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}.json", db_path)))
            .and(query_param("shallow", "true"))
            .and(header(
                "authorization",
                format!("Bearer {}", credentials::ACCESS_TOKEN).as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete(&self, db_path: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/{}.json", db_path)))
            .and(header(
                "authorization",
                format!("Bearer {}", credentials::ACCESS_TOKEN).as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&self.server)
            .await;
    }

    /// Respond to `verb` on `db_path` with a Realtime Database error body
    pub async fn mock_error(&self, verb: &str, db_path: &str, status: u16, message: &str) {
        Mock::given(method(verb))
            .and(path(format!("/{}.json", db_path)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": message })))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for `verb` on `request_path`
    pub async fn request_count(&self, verb: &str, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == request_path)
            .count()
    }
}
