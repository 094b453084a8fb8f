//! Tollgate Auth API server

use std::net::SocketAddr;

use auth_api::build_router;
use auth_api::config::Config;
use auth_api::state::AppState;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("auth_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tollgate Auth API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        secure_cookies = config.auth.secure_cookies,
        diagnostics = config.diagnostics_enabled,
        "Configuration loaded"
    );

    let missing = config.missing_auth_values();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Auth0 configuration incomplete; affected endpoints will fail");
    }
    if config.auth.secret.is_some() && !config.auth.secret_meets_minimum() {
        tracing::warn!("AUTH0_SECRET is shorter than 32 characters");
    }
    if config.diagnostics_enabled {
        tracing::warn!("Diagnostics endpoint enabled");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let app = build_router(AppState::new(config));

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
