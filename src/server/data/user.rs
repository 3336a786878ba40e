use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::server::model::db::UserModel;

/// Normalizes an email address for storage and case-insensitive lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Values for a user record created outside of the session lifecycle.
pub struct NewUser {
    pub email: String,
    pub encrypted_password: String,
    pub email_confirmed: bool,
    pub confirmation_token: Option<String>,
    pub remember_token: Option<String>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user, storing the email in normalized form
    pub async fn create(&self, new_user: NewUser) -> Result<UserModel, DbErr> {
        let now = Utc::now().naive_utc();
        let user = entity::turnstile_user::ActiveModel {
            email: ActiveValue::Set(normalize_email(&new_user.email)),
            encrypted_password: ActiveValue::Set(new_user.encrypted_password),
            email_confirmed: ActiveValue::Set(new_user.email_confirmed),
            confirmation_token: ActiveValue::Set(new_user.confirmation_token),
            remember_token: ActiveValue::Set(new_user.remember_token),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::TurnstileUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Finds a user by email, ignoring case and surrounding whitespace
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::TurnstileUser::find()
            .filter(entity::turnstile_user::Column::Email.eq(normalize_email(email)))
            .one(self.db)
            .await
    }

    pub async fn find_by_remember_token(&self, token: &str) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::TurnstileUser::find()
            .filter(entity::turnstile_user::Column::RememberToken.eq(token))
            .one(self.db)
            .await
    }

    /// Replaces the user's remember token
    ///
    /// Returns `Ok(None)` if the user does not exist.
    pub async fn update_remember_token(
        &self,
        user_id: i32,
        remember_token: &str,
    ) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.remember_token = ActiveValue::Set(Some(remember_token.to_string()));
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }

    /// Replaces the token embedded in confirmation emails
    ///
    /// Returns `Ok(None)` if the user does not exist.
    pub async fn update_confirmation_token(
        &self,
        user_id: i32,
        confirmation_token: &str,
    ) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.confirmation_token = ActiveValue::Set(Some(confirmation_token.to_string()));
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }

    /// Marks the user's email as confirmed and clears the confirmation token
    ///
    /// Returns `Ok(None)` if the user does not exist.
    pub async fn confirm_email(&self, user_id: i32) -> Result<Option<UserModel>, DbErr> {
        let Some(user) = self.get(user_id).await? else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.email_confirmed = ActiveValue::Set(true);
        user_am.confirmation_token = ActiveValue::Set(None);
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(user_am.update(self.db).await?))
    }
}
