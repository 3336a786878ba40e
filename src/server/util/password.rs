//! Argon2id password hashing.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::server::error::Error;

pub(crate) static DUMMY_PASSWORD_HASH: OnceLock<String> = OnceLock::new();

/// Hash of a random password, verified against when no user matches a sign-in attempt so that
/// unknown emails cost the same argon2 work as known ones.
pub fn dummy_password_hash() -> &'static str {
    DUMMY_PASSWORD_HASH.get_or_init(|| {
        let password = rand::random::<[u8; 16]>()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();

        hash_password(&password).unwrap_or_else(|err| {
            tracing::error!("Failed to hash the dummy password: {}", err);

            String::new()
        })
    })
}

/// Hashes a plaintext password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| Error::PasswordHashError(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a plaintext password against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(Error::PasswordHashError)` - Stored hash could not be parsed or verified
pub fn verify_password(password: &str, encrypted_password: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(encrypted_password)
        .map_err(|e| Error::PasswordHashError(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHashError(e.to_string())),
    }
}
