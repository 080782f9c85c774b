pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseSection;
use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./contacts.db?mode=rwc")
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&DatabaseSection::default())
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        Self {
            url: section.url.clone(),
            max_connections: section.max_connections.max(1),
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database. A single connection, since every
    /// new connection would open a fresh, empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply all pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running database migrations...");
    Migrator::up(db, None).await?;
    info!("Migrations completed");
    Ok(())
}

/// Connect to a fresh in-memory database with the schema applied.
pub async fn init_in_memory_database() -> Result<DatabaseConnection, DbErr> {
    let db = init_database(&DatabaseConfig::in_memory()).await?;
    run_migrations(&db).await?;
    Ok(db)
}
