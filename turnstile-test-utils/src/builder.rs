//! Declarative test setup.
//!
//! The builder queues table creation and user fixtures, then applies them in order during
//! [`TestBuilder::build`].

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// # Example
/// ```ignore
/// let mut test = TestBuilder::new()
///     .with_user_tables()
///     .with_confirmed_user(TEST_EMAIL)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,

    confirmed_users: Vec<String>,
    unconfirmed_users: Vec<String>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the `turnstile_user` table.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Inserts a confirmed user with [`TEST_PASSWORD`](crate::constant::TEST_PASSWORD).
    ///
    /// Implies [`with_user_tables`](Self::with_user_tables).
    pub fn with_confirmed_user(mut self, email: impl Into<String>) -> Self {
        self.include_user_tables = true;
        self.confirmed_users.push(email.into());
        self
    }

    /// Inserts an unconfirmed user with a pending confirmation token.
    ///
    /// Implies [`with_user_tables`](Self::with_user_tables).
    pub fn with_unconfirmed_user(mut self, email: impl Into<String>) -> Self {
        self.include_user_tables = true;
        self.unconfirmed_users.push(email.into());
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_user_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::TurnstileUser));
        }
        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for email in self.confirmed_users {
            setup.user().insert_confirmed_user(&email).await?;
        }

        for email in self.unconfirmed_users {
            setup.user().insert_unconfirmed_user(&email).await?;
        }

        Ok(setup)
    }
}
