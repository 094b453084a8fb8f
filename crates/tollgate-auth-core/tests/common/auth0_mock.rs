//! Mock Auth0 tenant for integration testing
//!
//! Provides wiremock-based `/oauth/token` and `/userinfo` endpoints.

use serde_json::{json, Value};
use tollgate_auth_core::{AuthConfig, ManagementConfig};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_CLIENT_ID: &str = "test-client-id";
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Mock Auth0 tenant
pub struct Auth0MockServer {
    server: MockServer,
}

impl Auth0MockServer {
    /// Start a tenant with no endpoints mounted
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server (without trailing slash)
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Config pointing at this tenant
    pub fn config(&self) -> AuthConfig {
        AuthConfig::new()
            .with_issuer(self.url())
            .with_client(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
            .with_base_url("https://app.example.com")
    }

    /// Config with management credentials as well
    #[allow(dead_code)]
    pub fn config_with_management(&self) -> AuthConfig {
        self.config().with_management(ManagementConfig {
            client_id: Some("mgmt-client".to_string()),
            client_secret: Some("mgmt-secret".to_string()),
            audience: None,
        })
    }

    /// Accept exactly `password` on the password grant; reject anything else
    pub async fn accept_password(&self, password: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains(format!("&password={password}&")))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&self.server)
            .await;

        self.reject_token_requests().await;
    }

    /// Accept the authorization-code grant for `code`
    #[allow(dead_code)]
    pub async fn accept_code(&self, code: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains(format!("code={code}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(&self.server)
            .await;

        self.reject_token_requests().await;
    }

    /// Accept the client-credentials grant
    #[allow(dead_code)]
    pub async fn accept_client_credentials(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "mgmt-token",
                "token_type": "Bearer",
                "expires_in": 86400
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every token request Auth0-style (lowest priority)
    pub async fn reject_token_requests(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Wrong email or password."
            })))
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// Serve `profile` from `/userinfo` for the test access token
    pub async fn with_profile(&self, profile: Value) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", format!("Bearer {TEST_ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile))
            .mount(&self.server)
            .await;
    }

    /// Make `/userinfo` answer 401
    #[allow(dead_code)]
    pub async fn reject_userinfo(&self) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests that reached the tenant
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }

    /// Number of requests to `path`
    #[allow(dead_code)]
    pub async fn requests_to(&self, target: &str) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.iter().filter(|req| req.url.path() == target).count())
            .unwrap_or_default()
    }

    /// Body of the most recent request to `path`
    #[allow(dead_code)]
    pub async fn last_body_to(&self, target: &str) -> Option<String> {
        self.server.received_requests().await.and_then(|r| {
            r.iter()
                .rev()
                .find(|req| req.url.path() == target)
                .map(|req| String::from_utf8_lossy(&req.body).into_owned())
        })
    }
}

/// Standard profile for the test user
#[allow(dead_code)]
pub fn test_profile() -> Value {
    json!({
        "sub": "auth0|user-1",
        "email": "a@b.com",
        "name": "Ada Lovelace",
        "picture": "https://cdn.example.com/ada.png"
    })
}

fn token_body() -> Value {
    json!({
        "access_token": TEST_ACCESS_TOKEN,
        "id_token": "test-id-token",
        "token_type": "Bearer",
        "expires_in": 86400,
        "scope": "openid profile email"
    })
}
