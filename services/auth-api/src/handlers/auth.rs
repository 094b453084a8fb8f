//! Authentication handlers (action dispatch, login, logout, me)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tollgate_auth_core::{AuthError, AuthorizeParams, LoginOutcome};
use tollgate_types::SessionUser;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{OptionalSessionAuth, SessionAuth};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string of `GET /api/auth` and `GET /api/auth/callback`
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub action: Option<String>,
    pub connection: Option<String>,
    pub screen_hint: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: SessionUser,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub token_type: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: outcome.user,
            access_token: outcome.tokens.access_token,
            id_token: outcome.tokens.id_token,
            expires_in: outcome.tokens.expires_in,
            token_type: outcome.tokens.token_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub action: &'static str,
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub action: &'static str,
    pub status: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/auth?action=login|logout|callback|profile
///
/// Hosted-page redirects and the callback/profile placeholders
pub async fn dispatch(
    State(state): State<AppState>,
    jar: CookieJar,
    session: OptionalSessionAuth,
    Query(query): Query<AuthQuery>,
) -> ApiResult<Response> {
    match query.action.as_deref() {
        Some("login") => {
            let params = AuthorizeParams {
                connection: query.connection,
                screen_hint: query.screen_hint,
            };
            let url = state.auth.authorize_url(&params)?;
            tracing::debug!("Redirecting to hosted login");
            Ok(found(&url))
        }
        Some("logout") => {
            let url = state.auth.logout_url()?;
            let cleared = state.auth.logout_cookies(jar.iter().map(|c| c.name()));
            tracing::info!(cleared = cleared.len(), "Logout via hosted page");
            Ok((clear_headers(cleared), found(&url)).into_response())
        }
        Some("callback") => complete_callback(&state, jar, query).await,
        Some("profile") => Ok(Json(ProfileResponse {
            action: "profile",
            user: session.0,
        })
        .into_response()),
        other => Err(ApiError::InvalidAction(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// GET /api/auth/callback
///
/// Return leg of the hosted login; the authorize URL points here
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<AuthQuery>,
) -> ApiResult<Response> {
    complete_callback(&state, jar, query).await
}

/// POST /api/auth/login
///
/// Exchange email and password for tokens and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let outcome = state.auth.login(&req.email, &req.password).await?;
    let cookie = state.auth.session_cookie(&outcome.user)?;

    Ok((jar.add(cookie), Json(outcome.into())))
}

/// POST /api/auth/logout
///
/// Expire every session cookie; succeeds with or without a session
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let cleared = state.auth.logout_cookies(jar.iter().map(|c| c.name()));
    tracing::info!(cleared = cleared.len(), "Logout");

    (clear_headers(cleared), Json(LogoutResponse { success: true }))
}

/// GET /api/auth/me
///
/// Identity from the session cookie
pub async fn me(SessionAuth(user): SessionAuth) -> Json<MeResponse> {
    Json(MeResponse { user })
}

// ============================================================================
// Helpers
// ============================================================================

async fn complete_callback(state: &AppState, jar: CookieJar, query: AuthQuery) -> ApiResult<Response> {
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "Hosted login returned an error");
        let message = query.error_description.unwrap_or(error);
        return Err(AuthError::UpstreamAuthFailure(message).into());
    }

    let Some(code) = query.code else {
        return Ok(Json(PendingResponse {
            action: "callback",
            status: "pending",
        })
        .into_response());
    };

    let base_url = state.auth.config().require_base_url()?.to_string();
    let outcome = state.auth.complete_callback(&code).await?;
    let cookie = state.auth.session_cookie(&outcome.user)?;

    Ok((jar.add(cookie), found(&base_url)).into_response())
}

/// 302 Found to `location`
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// One `Set-Cookie` header per cleared cookie variant
///
/// A `CookieJar` keeps one cookie per name, so the HttpOnly and non-HttpOnly
/// variants of the same name go out as raw headers.
fn clear_headers(cookies: Vec<Cookie<'static>>) -> AppendHeaders<Vec<(HeaderName, String)>> {
    AppendHeaders(
        cookies
            .into_iter()
            .map(|c| (header::SET_COOKIE, c.encoded().to_string()))
            .collect(),
    )
}
