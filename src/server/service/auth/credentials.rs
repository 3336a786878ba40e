use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::Error,
    model::db::UserModel,
    util::password::{dummy_password_hash, verify_password},
};

/// Outcome of checking an email and password.
///
/// Rejected attempts are outcomes rather than errors: the caller reports them to the user.
#[derive(Debug)]
pub enum Verification {
    /// Credentials match a confirmed user
    Authenticated(UserModel),
    /// No user has the email or the password does not match
    InvalidCredentials,
    /// Credentials match but the user has not confirmed their email yet
    UnconfirmedEmail(UserModel),
}

pub struct CredentialService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CredentialService<'a> {
    /// Creates a new instance of [`CredentialService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks an email and plaintext password against the stored credentials.
    ///
    /// The email lookup is case-insensitive. A stored hash that cannot be parsed is treated as
    /// a mismatch so a corrupt record can never authenticate. Unknown emails are still checked
    /// against a dummy hash so response times do not reveal which emails are registered.
    ///
    /// # Arguments
    /// - `email` - Email address entered by the user
    /// - `password` - Plaintext password entered by the user
    ///
    /// # Returns
    /// - `Ok(Verification::Authenticated(user))` - Valid credentials for a confirmed user
    /// - `Ok(Verification::UnconfirmedEmail(user))` - Valid credentials, email not confirmed
    /// - `Ok(Verification::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(Error::DbErr)` - Database lookup failed
    pub async fn verify(&self, email: &str, password: &str) -> Result<Verification, Error> {
        let user_repository = UserRepository::new(self.db);

        let Some(user) = user_repository.find_by_email(email).await? else {
            let _ = verify_password(password, dummy_password_hash());

            tracing::debug!("Sign in attempted for an unknown email");

            return Ok(Verification::InvalidCredentials);
        };

        let password_matches = match verify_password(password, &user.encrypted_password) {
            Ok(matches) => matches,
            Err(err) => {
                tracing::warn!(
                    user_id = %user.id,
                    "Stored password hash could not be verified: {}",
                    err
                );

                false
            }
        };

        if !password_matches {
            tracing::debug!(user_id = %user.id, "Sign in attempted with a wrong password");

            return Ok(Verification::InvalidCredentials);
        }

        if !user.email_confirmed {
            tracing::debug!(user_id = %user.id, "Sign in attempted before confirming email");

            return Ok(Verification::UnconfirmedEmail(user));
        }

        Ok(Verification::Authenticated(user))
    }
}
