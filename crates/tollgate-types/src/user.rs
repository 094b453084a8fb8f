//! Session identity types

use serde::{Deserialize, Serialize};

use crate::IdentityError;

/// Role assigned when the identity provider does not supply one
pub const DEFAULT_ROLE: &str = "operator";

/// Identity embedded in the session cookie
///
/// `id` and `email` default to empty on deserialization so that a payload
/// missing either field reaches [`SessionUser::validate`] instead of failing
/// inside serde with a less specific error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable subject identifier from the identity provider
    #[serde(default)]
    pub id: String,
    /// User email
    #[serde(default)]
    pub email: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Access-control label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionUser {
    /// Create an identity with only the required fields set
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            picture: None,
            role: None,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the avatar URL
    #[must_use]
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    /// Set the role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Check the `id` and `email` invariants
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.id.trim().is_empty() {
            return Err(IdentityError::MissingId);
        }
        if self.email.trim().is_empty() {
            return Err(IdentityError::MissingEmail);
        }
        Ok(())
    }

    /// Whether `id` and `email` are both present
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Effective role, falling back to [`DEFAULT_ROLE`]
    pub fn role(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role,
            _ => DEFAULT_ROLE,
        }
    }

    /// Fill in the default role when none (or a blank one) is set
    #[must_use]
    pub fn with_default_role(mut self) -> Self {
        if self.role.as_deref().map_or(true, |r| r.trim().is_empty()) {
            self.role = Some(DEFAULT_ROLE.to_string());
        }
        self
    }
}
