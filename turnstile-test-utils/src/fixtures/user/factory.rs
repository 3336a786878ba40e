//! Factory functions for in-memory user models and password hashes.

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{constant::TEST_PASSWORD, model::UserModel};

/// Hashes a password the same way the server stores them.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>()).expect("salt should encode");

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("password should hash")
        .to_string()
}

/// Argon2id hash of [`TEST_PASSWORD`], computed once per test binary.
pub fn test_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();

    HASH.get_or_init(|| hash_password(TEST_PASSWORD))
}

/// Confirmed user model that is not stored in any database.
pub fn mock_user_model(id: i32, email: &str) -> UserModel {
    let now = Utc::now().naive_utc();
    UserModel {
        id,
        email: email.to_string(),
        encrypted_password: test_password_hash().to_string(),
        email_confirmed: true,
        confirmation_token: None,
        remember_token: None,
        created_at: now,
        updated_at: now,
    }
}
