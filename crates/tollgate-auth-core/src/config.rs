//! Configuration types for the Auth0 façade
//!
//! Auth0 values are optional. The service boots without them and each
//! endpoint that needs one fails with [`AuthError::ConfigurationMissing`]
//! naming the variable.

use std::time::Duration;

use crate::AuthError;

/// Minimum accepted length for the cookie secret
pub const MIN_SECRET_LEN: usize = 32;

/// Custom claim carrying the user's role, unless overridden
pub const DEFAULT_ROLE_CLAIM: &str = "https://tollgate.app/role";

/// Auth0 Management API credentials (used by the diagnostics probe only)
#[derive(Clone, Default)]
pub struct ManagementConfig {
    /// Machine-to-machine client ID
    pub client_id: Option<String>,
    /// Machine-to-machine client secret
    pub client_secret: Option<String>,
    /// API audience; defaults to `{issuer}/api/v2/`
    pub audience: Option<String>,
}

impl ManagementConfig {
    /// Whether both client credentials are present
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl std::fmt::Debug for ManagementConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("audience", &self.audience)
            .finish()
    }
}

/// Auth0 façade configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Tenant issuer, normalized to `https://tenant.auth0.com` (no trailing slash)
    pub issuer_base_url: Option<String>,
    /// Application client ID
    pub client_id: Option<String>,
    /// Application client secret
    pub client_secret: Option<String>,
    /// Public URL of this service (no trailing slash)
    pub base_url: Option<String>,
    /// Cookie secret; only its presence and length are checked
    pub secret: Option<String>,
    /// Optional API audience requested with tokens
    pub audience: Option<String>,
    /// Claim holding the user's role
    pub role_claim: String,
    /// Management API credentials
    pub management: ManagementConfig,
    /// Emit `Secure` cookies (production)
    pub secure_cookies: bool,
    /// Session cookie lifetime
    pub session_duration: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    /// Create an empty config with defaults (7 day sessions, insecure cookies)
    pub fn new() -> Self {
        Self {
            issuer_base_url: None,
            client_id: None,
            client_secret: None,
            base_url: None,
            secret: None,
            audience: None,
            role_claim: DEFAULT_ROLE_CLAIM.to_string(),
            management: ManagementConfig::default(),
            secure_cookies: false,
            session_duration: Duration::from_secs(7 * 24 * 60 * 60), // 7 days
        }
    }

    /// Set the issuer; accepts a bare domain or a full URL
    pub fn with_issuer(mut self, issuer: impl AsRef<str>) -> Self {
        self.issuer_base_url = normalize_issuer(issuer.as_ref());
        self
    }

    /// Set the application client credentials
    pub fn with_client(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.client_id = non_blank(client_id.into());
        self.client_secret = non_blank(client_secret.into());
        self
    }

    /// Set the public base URL of this service
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = non_blank(base_url.as_ref().trim().trim_end_matches('/').to_string());
        self
    }

    /// Set the cookie secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = non_blank(secret.into());
        self
    }

    /// Set the API audience
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = non_blank(audience.into());
        self
    }

    /// Set the role claim key
    pub fn with_role_claim(mut self, claim: impl Into<String>) -> Self {
        self.role_claim = claim.into();
        self
    }

    /// Set management API credentials
    pub fn with_management(mut self, management: ManagementConfig) -> Self {
        self.management = management;
        self
    }

    /// Toggle `Secure` on emitted cookies
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Issuer base URL or a configuration error
    pub fn issuer(&self) -> Result<&str, AuthError> {
        self.issuer_base_url
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_ISSUER_BASE_URL"))
    }

    /// Client ID or a configuration error
    pub fn require_client_id(&self) -> Result<&str, AuthError> {
        self.client_id
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_CLIENT_ID"))
    }

    /// Client secret or a configuration error
    pub fn require_client_secret(&self) -> Result<&str, AuthError> {
        self.client_secret
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_CLIENT_SECRET"))
    }

    /// Base URL or a configuration error
    pub fn require_base_url(&self) -> Result<&str, AuthError> {
        self.base_url
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_BASE_URL"))
    }

    /// `{issuer}/oauth/token`
    pub fn token_url(&self) -> Result<String, AuthError> {
        Ok(format!("{}/oauth/token", self.issuer()?))
    }

    /// `{issuer}/userinfo`
    pub fn userinfo_url(&self) -> Result<String, AuthError> {
        Ok(format!("{}/userinfo", self.issuer()?))
    }

    /// Where Auth0 sends the browser back after hosted login
    pub fn callback_url(&self) -> Result<String, AuthError> {
        Ok(format!("{}/api/auth/callback", self.require_base_url()?))
    }

    /// Management API audience, defaulting to the tenant's `/api/v2/`
    pub fn management_audience(&self) -> Result<String, AuthError> {
        match &self.management.audience {
            Some(audience) => Ok(audience.clone()),
            None => Ok(format!("{}/api/v2/", self.issuer()?)),
        }
    }

    /// Whether the cookie secret is set and long enough
    pub fn secret_meets_minimum(&self) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|s| s.len() >= MIN_SECRET_LEN)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer_base_url", &self.issuer_base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("audience", &self.audience)
            .field("role_claim", &self.role_claim)
            .field("management", &self.management)
            .field("secure_cookies", &self.secure_cookies)
            .field("session_duration", &self.session_duration)
            .finish()
    }
}

/// Normalize an issuer given as `tenant.auth0.com` or `https://tenant.auth0.com/`
pub fn normalize_issuer(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
