//! Configuration and session diagnostics
//!
//! Reports presence only. Values, lengths and tokens never leave the process.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tollgate_auth_core::{ManagementStatus, SESSION_COOKIE_NAME};

use crate::extractors::OptionalSessionAuth;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub config: ConfigPresence,
    pub secret_meets_minimum: bool,
    pub secure_cookies: bool,
    pub cookies: Vec<String>,
    pub session: SessionCheck,
    pub management_api: ManagementStatus,
}

/// Which configuration values are set
#[derive(Debug, Serialize)]
pub struct ConfigPresence {
    pub issuer_base_url: bool,
    pub client_id: bool,
    pub client_secret: bool,
    pub base_url: bool,
    pub secret: bool,
    pub audience: bool,
    pub management_client_id: bool,
    pub management_client_secret: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionCheck {
    pub present: bool,
    pub valid: bool,
}

/// GET /api/auth/diagnostics
pub async fn diagnostics(
    State(state): State<AppState>,
    jar: CookieJar,
    session: OptionalSessionAuth,
) -> Json<DiagnosticsResponse> {
    let auth = state.auth.config();

    let config = ConfigPresence {
        issuer_base_url: auth.issuer_base_url.is_some(),
        client_id: auth.client_id.is_some(),
        client_secret: auth.client_secret.is_some(),
        base_url: auth.base_url.is_some(),
        secret: auth.secret.is_some(),
        audience: auth.audience.is_some(),
        management_client_id: auth.management.client_id.is_some(),
        management_client_secret: auth.management.client_secret.is_some(),
    };

    let cookies = jar.iter().map(|c| c.name().to_string()).collect();
    let session = SessionCheck {
        present: jar.get(SESSION_COOKIE_NAME).is_some(),
        valid: session.0.is_some(),
    };

    let management_api = state.auth.probe_management().await;
    tracing::info!(?management_api, session_valid = session.valid, "Diagnostics requested");

    Json(DiagnosticsResponse {
        config,
        secret_meets_minimum: auth.secret_meets_minimum(),
        secure_cookies: auth.secure_cookies,
        cookies,
        session,
        management_api,
    })
}
