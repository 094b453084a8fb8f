//! Tollgate Auth Core - Auth0 session façade logic
//!
//! Everything between the HTTP layer and Auth0: configuration, the Auth0
//! client, hosted-page URL construction, and the cookie session lifecycle
//! (mint on login, read on every request, clear on logout).

pub mod auth0;
pub mod config;
pub mod error;
pub mod provider;
pub mod service;
pub mod session;
pub mod urls;

pub use auth0::Auth0Client;
pub use config::{AuthConfig, ManagementConfig};
pub use error::AuthError;
pub use provider::{IdentityProvider, TokenSet, UserInfo};
pub use service::{AuthService, LoginOutcome, ManagementStatus};
pub use session::{
    clear_cookies, read_session, session_cookie, CookieProfile, SESSION_COOKIE_NAME,
    WELL_KNOWN_SESSION_COOKIES,
};
pub use urls::{authorize_url, logout_url, AuthorizeParams};
