//! Application state

use std::sync::Arc;
use std::time::Duration;

use tollgate_auth_core::AuthService;

use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth service for login, session and logout
    pub auth: AuthService,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create state backed by Auth0
    pub fn new(config: Config) -> Self {
        let auth = AuthService::new(config.auth.clone());
        Self::with_service(config, auth)
    }

    /// Create state around an existing auth service
    pub fn with_service(config: Config, auth: AuthService) -> Self {
        Self {
            auth,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }
}
