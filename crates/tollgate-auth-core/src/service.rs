//! Auth service - ties together the identity provider, hosted-page URLs, and
//! the cookie session lifecycle

use std::sync::Arc;

use cookie::Cookie;
use serde::Serialize;
use tollgate_types::SessionUser;

use crate::{
    auth0::Auth0Client,
    config::AuthConfig,
    provider::{IdentityProvider, TokenSet},
    session, urls, AuthError, AuthorizeParams,
};

/// Result of a successful login or callback
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Identity to store in the session cookie
    pub user: SessionUser,
    /// Tokens issued by the identity provider
    pub tokens: TokenSet,
}

/// Outcome of the management API credentials probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementStatus {
    /// Token issued
    Ok,
    /// Token request failed
    Error,
    /// No management credentials configured
    NotConfigured,
}

/// Authentication service
///
/// Provides unified interface for:
/// - Direct (password grant) and hosted (authorization code) login
/// - Session cookie minting, reading and clearing
/// - Hosted login/logout URL construction
#[derive(Clone)]
pub struct AuthService {
    config: Arc<AuthConfig>,
    provider: Arc<dyn IdentityProvider>,
}

impl AuthService {
    /// Create a service backed by Auth0
    pub fn new(config: AuthConfig) -> Self {
        let provider = Arc::new(Auth0Client::new(config.clone()));
        Self::with_provider(config, provider)
    }

    /// Create a service with a custom identity provider
    pub fn with_provider(config: AuthConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Log in with email and password
    ///
    /// Token exchange then userinfo, sequentially. Any provider rejection is
    /// an [`AuthError::UpstreamAuthFailure`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidRequest(
                "email and password are required".to_string(),
            ));
        }

        let tokens = self.provider.password_grant(email, password).await?;
        self.complete(tokens).await
    }

    /// Finish the hosted login flow from the callback's authorization code
    pub async fn complete_callback(&self, code: &str) -> Result<LoginOutcome, AuthError> {
        if code.trim().is_empty() {
            return Err(AuthError::InvalidRequest(
                "authorization code is required".to_string(),
            ));
        }

        let tokens = self.provider.exchange_code(code).await?;
        self.complete(tokens).await
    }

    async fn complete(&self, tokens: TokenSet) -> Result<LoginOutcome, AuthError> {
        let profile = self.provider.user_info(&tokens.access_token).await?;
        let user = profile.into_session_user(&self.config.role_claim)?;

        tracing::info!(user_id = %user.id, role = %user.role(), "Login succeeded");

        Ok(LoginOutcome { user, tokens })
    }

    // =========================================================================
    // Hosted pages
    // =========================================================================

    /// Hosted login page URL
    pub fn authorize_url(&self, params: &AuthorizeParams) -> Result<String, AuthError> {
        urls::authorize_url(&self.config, params)
    }

    /// Hosted logout URL
    pub fn logout_url(&self) -> Result<String, AuthError> {
        urls::logout_url(&self.config)
    }

    // =========================================================================
    // Session cookie
    // =========================================================================

    /// Cookie to set after a successful login
    pub fn session_cookie(&self, user: &SessionUser) -> Result<Cookie<'static>, AuthError> {
        session::session_cookie(user, &self.config)
    }

    /// Identity from the session cookie value
    pub fn read_session(&self, raw: Option<&str>) -> Result<SessionUser, AuthError> {
        session::read_session(raw)
    }

    /// Clear-cookies for logout, covering `present` plus the well-known names
    pub fn logout_cookies<I, S>(&self, present: I) -> Vec<Cookie<'static>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        session::clear_cookies(present, self.config.secure_cookies)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Try a client-credentials grant with the management credentials
    pub async fn probe_management(&self) -> ManagementStatus {
        if !self.config.management.is_configured() {
            return ManagementStatus::NotConfigured;
        }

        match self.provider.client_credentials().await {
            Ok(_) => ManagementStatus::Ok,
            Err(e) => {
                tracing::warn!(error = %e, "Management API probe failed");
                ManagementStatus::Error
            }
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
