//! User record fixtures.

pub mod factory;

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::TEST_PASSWORD,
    error::TestError,
    fixtures::user::factory::{hash_password, test_password_hash},
    model::UserModel,
    TestContext,
};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Inserts a confirmed user with [`TEST_PASSWORD`] and no remember token.
    pub async fn insert_confirmed_user(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert_user(email, TEST_PASSWORD, true, None).await
    }

    /// Inserts an unconfirmed user with [`TEST_PASSWORD`] and a pending confirmation token.
    pub async fn insert_unconfirmed_user(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert(
            email,
            test_password_hash().to_string(),
            false,
            Some(format!("confirm-{}", rand::random::<u64>())),
            None,
        )
        .await
    }

    /// Inserts a user with the given password, confirmation state and remember token.
    pub async fn insert_user(
        &self,
        email: &str,
        password: &str,
        email_confirmed: bool,
        remember_token: Option<&str>,
    ) -> Result<UserModel, TestError> {
        let encrypted_password = if password == TEST_PASSWORD {
            test_password_hash().to_string()
        } else {
            hash_password(password)
        };

        self.insert(
            email,
            encrypted_password,
            email_confirmed,
            None,
            remember_token.map(str::to_string),
        )
        .await
    }

    /// Inserts a user storing `encrypted_password` verbatim, for corrupt or legacy hashes.
    pub async fn insert_user_with_hash(
        &self,
        email: &str,
        encrypted_password: &str,
        email_confirmed: bool,
        remember_token: Option<&str>,
    ) -> Result<UserModel, TestError> {
        self.insert(
            email,
            encrypted_password.to_string(),
            email_confirmed,
            None,
            remember_token.map(str::to_string),
        )
        .await
    }

    async fn insert(
        &self,
        email: &str,
        encrypted_password: String,
        email_confirmed: bool,
        confirmation_token: Option<String>,
        remember_token: Option<String>,
    ) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::TurnstileUser::insert(entity::turnstile_user::ActiveModel {
                email: ActiveValue::Set(email.trim().to_lowercase()),
                encrypted_password: ActiveValue::Set(encrypted_password),
                email_confirmed: ActiveValue::Set(email_confirmed),
                confirmation_token: ActiveValue::Set(confirmation_token),
                remember_token: ActiveValue::Set(remember_token),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
