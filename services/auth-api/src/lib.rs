//! Tollgate Auth API
//!
//! Session façade in front of Auth0.
//!
//! ## REST Endpoints
//!
//! - `GET /api/auth?action=login|logout|callback|profile` - Hosted-page dispatch
//! - `GET /api/auth/callback` - Authorization code return leg
//! - `POST /api/auth/login` - Email/password login, sets the session cookie
//! - `POST /api/auth/logout` - Clears every session cookie
//! - `GET /api/auth/me` - Identity from the session cookie
//! - `GET /api/auth/diagnostics` - Presence-only diagnostics (opt-in)
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

/// Build the HTTP router with middleware
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    let mut api = Router::new()
        .route("/auth", get(handlers::dispatch))
        .route("/auth/callback", get(handlers::callback))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/me", get(handlers::me));

    if state.config.diagnostics_enabled {
        api = api.route("/auth/diagnostics", get(handlers::diagnostics));
    }

    // Health route (no timeout - must always respond quickly)
    let health_routes = Router::new().route("/health", get(handlers::health));

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .with_state(state)
}
