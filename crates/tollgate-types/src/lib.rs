//! Tollgate Types - Shared domain types
//!
//! This crate contains the types shared by the Tollgate crates:
//! - The session identity carried in the session cookie
//! - Identity validation errors

pub mod error;
pub mod user;

pub use error::*;
pub use user::*;
