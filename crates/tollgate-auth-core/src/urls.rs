//! Hosted login/logout URL construction
//!
//! Pure functions of the configuration and the optional query parameters.
//! Parameters are appended in a fixed order so equal inputs always produce
//! byte-identical URLs.

use serde::Deserialize;
use url::Url;

use crate::{AuthConfig, AuthError};

/// Scopes requested for every login
pub const LOGIN_SCOPE: &str = "openid profile email";

/// Optional hints forwarded to the hosted login page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorizeParams {
    /// Federated connection to use (e.g. `google-oauth2`)
    pub connection: Option<String>,
    /// Initial screen (e.g. `signup`)
    pub screen_hint: Option<String>,
}

/// Build `{issuer}/authorize` for the authorization-code flow
pub fn authorize_url(config: &AuthConfig, params: &AuthorizeParams) -> Result<String, AuthError> {
    let issuer = config.issuer()?;
    let client_id = config.require_client_id()?;
    let redirect_uri = config.callback_url()?;

    let mut url = endpoint(issuer, "/authorize")?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("scope", LOGIN_SCOPE);

        if let Some(audience) = &config.audience {
            query.append_pair("audience", audience);
        }
        if let Some(connection) = non_empty(params.connection.as_deref()) {
            query.append_pair("connection", connection);
        }
        if let Some(screen_hint) = non_empty(params.screen_hint.as_deref()) {
            query.append_pair("screen_hint", screen_hint);
        }
    }

    Ok(url.to_string())
}

/// Build `{issuer}/v2/logout` returning the browser to the base URL
pub fn logout_url(config: &AuthConfig) -> Result<String, AuthError> {
    let issuer = config.issuer()?;
    let client_id = config.require_client_id()?;
    let base_url = config.require_base_url()?;

    let mut url = endpoint(issuer, "/v2/logout")?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("returnTo", base_url);

    Ok(url.to_string())
}

fn endpoint(issuer: &str, path: &str) -> Result<Url, AuthError> {
    Url::parse(&format!("{issuer}{path}"))
        .map_err(|e| AuthError::Unexpected(format!("invalid issuer URL: {e}")))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
