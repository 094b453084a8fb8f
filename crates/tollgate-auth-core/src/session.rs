//! Cookie session lifecycle
//!
//! The session is the cookie: a JSON-encoded [`SessionUser`] under
//! [`SESSION_COOKIE_NAME`]. There is no server-side store and no signature;
//! integrity rests on `HttpOnly`, `Secure` and `SameSite`.

use std::collections::HashSet;

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};
use tollgate_types::SessionUser;

use crate::{AuthConfig, AuthError};

/// Cookie carrying the session identity
pub const SESSION_COOKIE_NAME: &str = "auth0_user";

/// Session cookie names cleared on logout whether or not they are present
pub const WELL_KNOWN_SESSION_COOKIES: &[&str] = &[
    SESSION_COOKIE_NAME,
    "appSession",
    "appSession.0",
    "appSession.1",
    "auth0.is.authenticated",
    "_legacy_auth0.is.authenticated",
    "auth_verification",
];

/// One attribute combination a clear-cookie is emitted under
///
/// Browsers only overwrite a cookie when the attributes line up with the
/// original, so logout repeats every clear under each profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieProfile {
    pub http_only: bool,
    pub secure: bool,
}

impl CookieProfile {
    /// Profiles used for logout: `HttpOnly` on and off
    pub fn clear_profiles(secure: bool) -> [Self; 2] {
        [
            Self {
                http_only: true,
                secure,
            },
            Self {
                http_only: false,
                secure,
            },
        ]
    }

    /// An already-expired, empty cookie under this profile
    pub fn expired(&self, name: impl Into<String>) -> Cookie<'static> {
        Cookie::build((name.into(), ""))
            .path("/")
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

/// Build the session cookie minted at login
pub fn session_cookie(user: &SessionUser, config: &AuthConfig) -> Result<Cookie<'static>, AuthError> {
    let value = serde_json::to_string(user).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize session identity");
        AuthError::Unexpected("failed to create session".to_string())
    })?;

    let max_age = i64::try_from(config.session_duration.as_secs()).unwrap_or(i64::MAX);

    Ok(Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age))
        .build())
}

/// Decode the session cookie value into an identity
///
/// `raw` is the (already percent-decoded) cookie value, if the cookie was sent.
pub fn read_session(raw: Option<&str>) -> Result<SessionUser, AuthError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidSession)?;

    let user: SessionUser = serde_json::from_str(raw).map_err(|e| {
        tracing::debug!(error = %e, "Session cookie is not a valid identity payload");
        AuthError::InvalidSession
    })?;

    user.validate().map_err(|e| {
        tracing::debug!(reason = %e, "Session identity rejected");
        AuthError::InvalidSession
    })?;

    Ok(user.with_default_role())
}

/// Clear-cookies for logout
///
/// Covers the well-known names plus every name in `present`, each under every
/// [`CookieProfile::clear_profiles`] entry. Names are deduplicated; order is
/// well-known names first, then request cookies in the order given.
pub fn clear_cookies<I, S>(present: I, secure: bool) -> Vec<Cookie<'static>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let names: Vec<String> = WELL_KNOWN_SESSION_COOKIES
        .iter()
        .map(|n| (*n).to_string())
        .chain(present.into_iter().map(|n| n.as_ref().to_string()))
        .filter(|n| !n.is_empty() && seen.insert(n.clone()))
        .collect();

    let profiles = CookieProfile::clear_profiles(secure);
    names
        .iter()
        .flat_map(|name| profiles.iter().map(move |p| p.expired(name.clone())))
        .collect()
}
