//! HTTP handlers

mod auth;
mod diagnostics;
mod health;

pub use auth::{callback, dispatch, login, logout, me};
pub use diagnostics::diagnostics;
pub use health::health;
