//! Remember-token issuance and rotation.
//!
//! The `remember_token` cookie lets a browser re-authenticate without a server-side session.
//! Signing in reuses the token already stored on the user; signing out rotates it so that
//! every previously issued cookie stops working.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::db::UserModel,
    util::{
        time::{one_year_from, to_offset_date_time},
        token::generate_token,
    },
};

/// Name of the cookie carrying the remember token.
pub const REMEMBER_TOKEN_COOKIE: &str = "remember_token";

/// Strategy deciding when an issued remember cookie expires.
///
/// Receives the user being signed in and the default expiration (one year from now).
/// Returning `None` issues a session cookie without an `Expires` attribute.
pub trait RememberTokenExpiry: Send + Sync {
    fn expires_at(&self, user: &UserModel, default: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

impl<F> RememberTokenExpiry for F
where
    F: Fn(&UserModel, DateTime<Utc>) -> Option<DateTime<Utc>> + Send + Sync,
{
    fn expires_at(&self, user: &UserModel, default: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self(user, default)
    }
}

/// Keeps the default expiration of one year.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRememberExpiry;

impl RememberTokenExpiry for DefaultRememberExpiry {
    fn expires_at(&self, _user: &UserModel, default: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Some(default)
    }
}

/// Expires cookies a fixed duration after they are issued.
///
/// Falls back to the default expiration when the duration reaches past the representable
/// date range.
#[derive(Clone, Copy, Debug)]
pub struct FixedRememberExpiry(pub Duration);

impl FixedRememberExpiry {
    pub fn days(days: u32) -> Self {
        Self(Duration::days(i64::from(days)))
    }
}

impl RememberTokenExpiry for FixedRememberExpiry {
    fn expires_at(&self, _user: &UserModel, default: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Utc::now().checked_add_signed(self.0).or(Some(default))
    }
}

pub struct RememberTokenService<'a> {
    db: &'a DatabaseConnection,
    expiry: &'a dyn RememberTokenExpiry,
}

impl<'a> RememberTokenService<'a> {
    /// Creates a new instance of [`RememberTokenService`]
    pub fn new(db: &'a DatabaseConnection, expiry: &'a dyn RememberTokenExpiry) -> Self {
        Self { db, expiry }
    }

    /// Builds the remember cookie for a user who just signed in.
    ///
    /// The stored token is reused verbatim. A user without a token gets one generated and
    /// persisted first so that the cookie never carries an empty value.
    ///
    /// # Arguments
    /// - `user` - User being signed in
    ///
    /// # Returns
    /// - `Ok(Cookie)` - `remember_token` cookie, with `Expires` unless the expiry strategy
    ///   returned `None`
    /// - `Err(Error)` - Persisting a generated token failed, or the expiration could not be
    ///   represented
    pub async fn issue_cookie(&self, user: &UserModel) -> Result<Cookie<'static>, Error> {
        let token = self.ensure_token(user).await?;
        let expires_at = self.expiry.expires_at(user, one_year_from(Utc::now()));

        let mut cookie = Cookie::build((REMEMBER_TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(!cfg!(debug_assertions))
            .same_site(SameSite::Lax)
            .build();

        if let Some(expires_at) = expires_at {
            cookie.set_expires(to_offset_date_time(expires_at)?);
        }

        Ok(cookie)
    }

    /// Replaces the user's remember token, invalidating every issued cookie.
    ///
    /// # Returns
    /// - `Ok(String)` - The new token, guaranteed to differ from the previous one
    /// - `Err(Error::AuthError(AuthError::UserNotInDatabase))` - User no longer exists
    /// - `Err(Error::DbErr)` - Database update failed
    pub async fn rotate(&self, user: &UserModel) -> Result<String, Error> {
        let mut token = generate_token();
        while user.remember_token.as_deref() == Some(token.as_str()) {
            token = generate_token();
        }

        let updated = UserRepository::new(self.db)
            .update_remember_token(user.id, &token)
            .await?;

        if updated.is_none() {
            return Err(AuthError::UserNotInDatabase(user.id).into());
        }

        tracing::debug!(user_id = %user.id, "Rotated remember token");

        Ok(token)
    }

    /// Finds the user owning a remember token, ignoring empty tokens
    pub async fn find_user(&self, token: &str) -> Result<Option<UserModel>, Error> {
        if token.is_empty() {
            return Ok(None);
        }

        Ok(UserRepository::new(self.db)
            .find_by_remember_token(token)
            .await?)
    }

    /// Cookie that deletes `remember_token` from the browser when removed from a jar
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(REMEMBER_TOKEN_COOKIE).path("/").build()
    }

    async fn ensure_token(&self, user: &UserModel) -> Result<String, Error> {
        if let Some(token) = user.remember_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        let token = generate_token();
        let updated = UserRepository::new(self.db)
            .update_remember_token(user.id, &token)
            .await?;

        if updated.is_none() {
            return Err(AuthError::UserNotInDatabase(user.id).into());
        }

        Ok(token)
    }
}
