//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Resources available to a running test.
///
/// Every context owns its own in-memory database, so tests never observe each other's rows.
pub struct TestContext {
    pub db: DatabaseConnection,
    pub session: Session,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Fresh anonymous session, as a browser that only kept its cookies would present.
    pub fn new_session(&self) -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }
}
