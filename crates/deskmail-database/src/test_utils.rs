//! Test utilities for database integration tests
//!
//! Every [`TestDatabase`] is a private in-memory SQLite database with the full
//! schema applied, so tests are isolated from each other and need no external
//! services.

use crate::DbConnection;
use deskmail_core::DatabaseConfig;
use deskmail_migrations::Migrator;
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// In-memory test database
pub struct TestDatabase {
    pub db: Arc<DbConnection>,
    pub database_url: String,
}

impl TestDatabase {
    /// Create an empty in-memory database without any tables
    pub async fn new() -> anyhow::Result<Self> {
        let database_url = "sqlite::memory:".to_string();
        let db = crate::connect(&DatabaseConfig::for_url(database_url.clone()))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open test database: {}", e))?;

        let test_db = TestDatabase {
            db: Arc::new(db),
            database_url,
        };

        test_db
            .test_connection()
            .await
            .map_err(|e| anyhow::anyhow!("Initial connection test failed: {}", e))?;

        Ok(test_db)
    }

    /// Create a test database and run all migrations
    pub async fn with_migrations() -> anyhow::Result<Self> {
        let test_db = Self::new().await?;

        Migrator::up(&*test_db.db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

        Ok(test_db)
    }

    /// Execute raw SQL for testing
    pub async fn execute_sql(&self, sql: &str) -> anyhow::Result<ExecResult> {
        let statement = Statement::from_string(DatabaseBackend::Sqlite, sql.to_owned());
        let result = self.db.execute(statement).await.map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Query raw SQL and return results
    pub async fn query_sql(&self, sql: &str) -> anyhow::Result<Vec<QueryResult>> {
        let statement = Statement::from_string(DatabaseBackend::Sqlite, sql.to_owned());
        let result = self
            .db
            .query_all(statement)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Check that the connection answers a trivial query
    pub async fn test_connection(&self) -> anyhow::Result<()> {
        self.execute_sql("SELECT 1").await?;
        Ok(())
    }

    /// Delete all rows from the application tables, keeping the schema
    pub async fn cleanup_all_tables(&self) -> anyhow::Result<()> {
        for table in ["messages", "position_aliases", "employees"] {
            self.execute_sql(&format!("DELETE FROM {}", table)).await?;
        }
        Ok(())
    }
}
