//! Configuration for the Auth API service.

use std::time::Duration;

use tollgate_auth_core::{AuthConfig, ManagementConfig};

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Inbound request timeout
    pub request_timeout: Duration,

    /// Mount `GET /api/auth/diagnostics`
    pub diagnostics_enabled: bool,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // Server
        let http_port = var("HTTP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let diagnostics_enabled = var("DIAGNOSTICS_ENABLED")
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DIAGNOSTICS_ENABLED"))?;

        let production = var("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"));

        // Auth0 tenant; every value optional at boot
        let mut auth = AuthConfig::new().with_secure_cookies(production);

        if let Some(issuer) = var("AUTH0_ISSUER_BASE_URL").or_else(|| var("AUTH0_DOMAIN")) {
            auth = auth.with_issuer(issuer);
        }
        auth.client_id = var("AUTH0_CLIENT_ID");
        auth.client_secret = var("AUTH0_CLIENT_SECRET");
        if let Some(base_url) = var("AUTH0_BASE_URL") {
            auth = auth.with_base_url(base_url);
        }
        if let Some(secret) = var("AUTH0_SECRET") {
            auth = auth.with_secret(secret);
        }
        if let Some(audience) = var("AUTH0_AUDIENCE") {
            auth = auth.with_audience(audience);
        }
        if let Some(claim) = var("AUTH0_ROLE_CLAIM") {
            auth = auth.with_role_claim(claim);
        }

        let auth = auth.with_management(ManagementConfig {
            client_id: var("AUTH0_MGMT_CLIENT_ID"),
            client_secret: var("AUTH0_MGMT_CLIENT_SECRET"),
            audience: var("AUTH0_MGMT_AUDIENCE"),
        });

        Ok(Self {
            http_port,
            request_timeout: Duration::from_secs(request_timeout_secs),
            diagnostics_enabled,
            auth,
        })
    }

    /// Names of required Auth0 variables that are unset
    pub fn missing_auth_values(&self) -> Vec<&'static str> {
        let auth = &self.auth;
        [
            ("AUTH0_ISSUER_BASE_URL", auth.issuer_base_url.is_some()),
            ("AUTH0_CLIENT_ID", auth.client_id.is_some()),
            ("AUTH0_CLIENT_SECRET", auth.client_secret.is_some()),
            ("AUTH0_BASE_URL", auth.base_url.is_some()),
            ("AUTH0_SECRET", auth.secret.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for: {0}")]
    Invalid(&'static str),
}
