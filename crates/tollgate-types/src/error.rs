//! Common error types

use thiserror::Error;

/// Reasons a session identity fails validation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// Subject identifier absent or blank
    #[error("identity is missing a subject id")]
    MissingId,

    /// Email absent or blank
    #[error("identity is missing an email")]
    MissingEmail,
}
