//! Shared test setup for the Turnstile workspace.
//!
//! Tests configure their environment with [`TestBuilder`] and receive a [`TestContext`] holding
//! an in-memory SQLite database and a session backed by `MemoryStore`. User records are
//! inserted through the fixtures returned by [`TestContext::user`].

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_EMAIL, TEST_PASSWORD},
        fixtures::user::factory::{mock_user_model, test_password_hash},
        TestBuilder, TestContext, TestError,
    };
}
