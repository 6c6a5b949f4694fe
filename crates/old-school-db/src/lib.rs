//! # Old-school DB
//!
//! Connection pool lifecycle for the old-school API.
//!
//! The pool is opened once at startup with [`init_db_pool`], shared through
//! the application state, and closed with [`close_db_pool`] after the server
//! has drained.
//!
//! # Example
//!
//! ```ignore
//! use old_school_config::DatabaseConfig;
//! use old_school_db::{close_db_pool, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! // serve requests
//! close_db_pool(&pool).await;
//! ```

use old_school_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool.
///
/// # Errors
///
/// Fails if the connection string is invalid or the server is unreachable.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool established"
    );

    Ok(pool)
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Waits for checked-out connections to be returned, then closes the pool.
pub async fn close_db_pool(pool: &PgPool) {
    pool.close().await;
    info!("Database pool closed");
}
