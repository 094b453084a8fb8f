//! Common test utilities for tollgate-auth-core integration tests

pub mod auth0_mock;

#[allow(unused_imports)]
pub use auth0_mock::{
    test_profile, Auth0MockServer, TEST_ACCESS_TOKEN, TEST_CLIENT_ID, TEST_CLIENT_SECRET,
};
