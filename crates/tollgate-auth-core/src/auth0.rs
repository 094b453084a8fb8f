//! Auth0 identity provider implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::provider::{IdentityProvider, TokenSet, UserInfo};
use crate::urls::LOGIN_SCOPE;

/// Error body returned by the Auth0 token endpoint
#[derive(Debug, Default, Deserialize)]
struct Auth0ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

impl Auth0ErrorBody {
    fn into_message(self) -> String {
        self.error_description
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "authentication failed".to_string())
    }
}

/// Auth0 client for the token and userinfo endpoints
#[derive(Clone)]
pub struct Auth0Client {
    client: Client,
    config: AuthConfig,
}

impl Auth0Client {
    /// Create a new Auth0 client
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(config: AuthConfig, client: Client) -> Self {
        Self { client, config }
    }

    /// POST a form to `{issuer}/oauth/token`
    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenSet, AuthError> {
        let url = self.config.token_url()?;

        let response = self.client.post(&url).form(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Auth0ErrorBody = response.json().await.unwrap_or_default();
            let message = body.into_message();
            warn!(status = %status, message = %message, "Auth0 token request rejected");
            return Err(AuthError::UpstreamAuthFailure(message));
        }

        response.json::<TokenSet>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Auth0 token response");
            AuthError::Unexpected(e.to_string())
        })
    }
}

#[async_trait]
impl IdentityProvider for Auth0Client {
    #[instrument(skip(self, password))]
    async fn password_grant(&self, email: &str, password: &str) -> Result<TokenSet, AuthError> {
        debug!("Requesting password grant");

        let client_id = self.config.require_client_id()?;
        let client_secret = self.config.require_client_secret()?;

        let mut form = vec![
            ("grant_type", "password"),
            ("username", email),
            ("password", password),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", LOGIN_SCOPE),
        ];
        if let Some(audience) = self.config.audience.as_deref() {
            form.push(("audience", audience));
        }

        self.token_request(&form).await
    }

    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError> {
        debug!("Exchanging authorization code");

        let client_id = self.config.require_client_id()?;
        let client_secret = self.config.require_client_secret()?;
        let redirect_uri = self.config.callback_url()?;

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri.as_str()),
        ];

        self.token_request(&form).await
    }

    #[instrument(skip(self))]
    async fn client_credentials(&self) -> Result<TokenSet, AuthError> {
        debug!("Requesting management API token");

        let client_id = self
            .config
            .management
            .client_id
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_MGMT_CLIENT_ID"))?;
        let client_secret = self
            .config
            .management
            .client_secret
            .as_deref()
            .ok_or(AuthError::ConfigurationMissing("AUTH0_MGMT_CLIENT_SECRET"))?;
        let audience = self.config.management_audience()?;

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("audience", audience.as_str()),
        ];

        self.token_request(&form).await
    }

    #[instrument(skip(self, access_token))]
    async fn user_info(&self, access_token: &str) -> Result<UserInfo, AuthError> {
        let url = self.config.userinfo_url()?;

        let response = self.client.get(&url).bearer_auth(access_token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Auth0 userinfo request rejected");
            return Err(AuthError::UpstreamAuthFailure(
                "failed to load user profile".to_string(),
            ));
        }

        response.json::<UserInfo>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Auth0 userinfo response");
            AuthError::Unexpected(e.to_string())
        })
    }
}

impl std::fmt::Debug for Auth0Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth0Client")
            .field("issuer", &self.config.issuer_base_url)
            .finish_non_exhaustive()
    }
}
