//! Axum extractors for the cookie session

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tollgate_auth_core::{read_session, SESSION_COOKIE_NAME};
use tollgate_types::SessionUser;

use crate::error::ApiError;

/// Identity read from the `auth0_user` cookie
///
/// Rejects with `401 INVALID_SESSION` when the cookie is absent, blank,
/// unparsable, or missing `id`/`email`.
#[derive(Debug, Clone)]
pub struct SessionAuth(pub SessionUser);

impl<S> FromRequestParts<S> for SessionAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let raw = jar.get(SESSION_COOKIE_NAME).map(|c| c.value());

        let user = read_session(raw).map_err(|e| {
            tracing::debug!(error = %e, "Session cookie rejected");
            e
        })?;

        Ok(Self(user))
    }
}

/// Session identity when present; never rejects
#[derive(Debug, Clone)]
pub struct OptionalSessionAuth(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalSessionAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            SessionAuth::from_request_parts(parts, state)
                .await
                .ok()
                .map(|SessionAuth(user)| user),
        ))
    }
}
