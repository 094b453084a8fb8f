//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Required configuration value absent
    #[error("missing required configuration: {0}")]
    ConfigurationMissing(&'static str),

    /// Identity provider rejected the credentials or token exchange
    #[error("{0}")]
    UpstreamAuthFailure(String),

    /// Session cookie absent, unparsable, or missing required fields
    #[error("invalid session")]
    InvalidSession,

    /// Caller supplied unusable input
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Anything else
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UpstreamAuthFailure(_) | Self::InvalidSession => 401,
            Self::InvalidRequest(_) => 400,
            Self::ConfigurationMissing(_) | Self::Unexpected(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            Self::UpstreamAuthFailure(_) => "AUTHENTICATION_FAILED",
            Self::InvalidSession => "INVALID_SESSION",
            Self::InvalidRequest(_) => "BAD_REQUEST",
            Self::Unexpected(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether details must stay out of client responses
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Unexpected(_))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!(error = %err, "Identity provider request failed");
        Self::Unexpected(err.to_string())
    }
}
