//! Common test utilities for auth-api router tests
//!
//! Builds the real router around a wiremock Auth0 tenant and drives it with
//! `tower::ServiceExt::oneshot`.

use std::time::Duration;

use auth_api::build_router;
use auth_api::config::Config;
use auth_api::state::AppState;
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tollgate_auth_core::{AuthConfig, ManagementConfig};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header as match_header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BASE_URL: &str = "https://app.example.com";
pub const CLIENT_ID: &str = "router-client-id";
pub const PASSWORD: &str = "correct-horse";
const ACCESS_TOKEN: &str = "router-access-token";

/// Router plus the Auth0 tenant behind it
pub struct TestApp {
    pub router: Router,
    pub tenant: MockServer,
}

/// Knobs for building a test app
#[derive(Default)]
pub struct TestAppOptions {
    pub without_client_id: bool,
    pub production: bool,
    pub diagnostics: bool,
    pub management: bool,
}

/// Parsed response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` header values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    /// `Set-Cookie` values for `name`
    pub fn set_cookies_named(&self, name: &str) -> Vec<String> {
        let prefix = format!("{name}=");
        self.set_cookies()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    /// `name=value` pair of the first `Set-Cookie` for `name`, ready for a `Cookie` header
    pub fn cookie_pair(&self, name: &str) -> Option<String> {
        self.set_cookies_named(name)
            .first()
            .and_then(|c| c.split(';').next())
            .map(String::from)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn start() -> Self {
        Self::with_options(TestAppOptions::default()).await
    }

    pub async fn with_options(options: TestAppOptions) -> Self {
        let tenant = MockServer::start().await;

        let mut auth = AuthConfig::new()
            .with_issuer(tenant.uri())
            .with_client(CLIENT_ID, "router-client-secret")
            .with_base_url(BASE_URL)
            .with_secret("0123456789abcdef0123456789abcdef")
            .with_secure_cookies(options.production);
        if options.without_client_id {
            auth.client_id = None;
        }
        if options.management {
            auth = auth.with_management(ManagementConfig {
                client_id: Some("mgmt-client".to_string()),
                client_secret: Some("mgmt-secret".to_string()),
                audience: None,
            });
        }

        let config = Config {
            http_port: 0,
            request_timeout: Duration::from_secs(5),
            diagnostics_enabled: options.diagnostics,
            auth,
        };

        Self {
            router: build_router(AppState::new(config)),
            tenant,
        }
    }

    /// Tenant accepts [`PASSWORD`] and code `good-code`, serves a standard profile
    pub async fn with_tenant_accepting_logins(self) -> Self {
        let tokens = json!({
            "access_token": ACCESS_TOKEN,
            "id_token": "router-id-token",
            "token_type": "Bearer",
            "expires_in": 86400
        });

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains(format!("&password={PASSWORD}&")))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens.clone()))
            .mount(&self.tenant)
            .await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("code=good-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tokens))
            .mount(&self.tenant)
            .await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "mgmt-token",
                "token_type": "Bearer"
            })))
            .mount(&self.tenant)
            .await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Wrong email or password."
            })))
            .with_priority(10)
            .mount(&self.tenant)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(match_header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "auth0|router-user",
                "email": "ada@example.com",
                "name": "Ada Lovelace"
            })))
            .mount(&self.tenant)
            .await;

        self
    }

    /// Number of requests that reached the tenant
    pub async fn tenant_requests(&self) -> usize {
        self.tenant
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().method("POST").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(request.body(body).unwrap()).await
    }

    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &'static str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Log in with [`PASSWORD`] and return the `auth0_user=...` cookie pair
    pub async fn login(&self) -> String {
        let response = self
            .post(
                "/api/auth/login",
                Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.cookie_pair("auth0_user").expect("session cookie set")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
