//! Identity provider abstraction

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tollgate_types::SessionUser;

use crate::AuthError;

/// Operations the façade needs from a hosted identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email and password for tokens (password grant)
    async fn password_grant(&self, email: &str, password: &str) -> Result<TokenSet, AuthError>;

    /// Exchange an authorization code from the hosted login callback
    async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError>;

    /// Obtain a Management API token (client-credentials grant)
    async fn client_credentials(&self) -> Result<TokenSet, AuthError>;

    /// Load the profile behind an access token
    async fn user_info(&self, access_token: &str) -> Result<UserInfo, AuthError>;
}

/// Token endpoint response
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// OIDC userinfo response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    /// Every other claim, including namespaced custom claims
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserInfo {
    /// Role from `claim`, then from a plain `role` claim
    ///
    /// Array-valued claims (Auth0 role lists) yield their first string.
    pub fn role(&self, claim: &str) -> Option<String> {
        [claim, "role"]
            .iter()
            .filter_map(|key| self.extra.get(*key))
            .find_map(role_from_value)
    }

    /// Build the session identity, defaulting the role
    pub fn into_session_user(self, role_claim: &str) -> Result<SessionUser, AuthError> {
        let role = self.role(role_claim);

        let id = self.sub.filter(|s| !s.trim().is_empty());
        let email = self.email.filter(|e| !e.trim().is_empty());
        let (Some(id), Some(email)) = (id, email) else {
            tracing::warn!("Identity provider profile lacks sub or email");
            return Err(AuthError::UpstreamAuthFailure(
                "identity provider returned an incomplete profile".to_string(),
            ));
        };

        Ok(SessionUser {
            id,
            email,
            name: self.name,
            picture: self.picture,
            role,
        }
        .with_default_role())
    }
}

fn role_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(role_from_value),
        _ => None,
    }
}
