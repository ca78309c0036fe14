//! Database connection management

use deskmail_core::{DatabaseConfig, ServiceError, ServiceResult};
use deskmail_migrations::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub type DbConnection = DatabaseConnection;

/// Connect using an explicit pool configuration without running migrations
pub async fn connect(config: &DatabaseConfig) -> ServiceResult<DbConnection> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(false);

    debug!(
        "Connecting to database (max_connections={}, min_connections={})",
        config.max_connections, config.min_connections
    );

    Database::connect(opt)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))
}

/// Connect to `database_url` and bring the schema up to date
pub async fn establish_connection(database_url: &str) -> ServiceResult<Arc<DbConnection>> {
    let db = connect(&DatabaseConfig::for_url(database_url)).await?;

    // Run migrations
    Migrator::up(&db, None)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    info!("Database connection established and migrations applied");

    Ok(Arc::new(db))
}
