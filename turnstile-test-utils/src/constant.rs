//! Credentials shared by the user fixtures.

/// Email address of the default test user.
pub static TEST_EMAIL: &str = "user@example.com";

/// Plaintext password every fixture user is created with unless told otherwise.
pub static TEST_PASSWORD: &str = "password";
