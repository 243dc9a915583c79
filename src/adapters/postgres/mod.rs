//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresHubRepository` - hub registration and lookup
//! - `PostgresSessionRepository` - session lifecycle, one active per hub via a partial unique index
//! - `PostgresItemRepository` - item registration, LIFO removal, range scans
//!
//! Plus pool construction and the embedded schema migrations.

mod hub_repository;
mod item_repository;
mod session_repository;

pub use hub_repository::PostgresHubRepository;
pub use item_repository::PostgresItemRepository;
pub use session_repository::PostgresSessionRepository;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Open a connection pool sized and timed by `config`.
///
/// # Errors
///
/// - `DatabaseError` if the URL is missing or the first connection fails
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    config
        .validate_required()
        .map_err(|e| DomainError::database(format!("Invalid database configuration: {}", e)))?;

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Apply the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
    info!("database migrations applied");
    Ok(())
}

/// Read one column, mapping decode failures to `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Wrap a query failure with what was being attempted.
fn query_failed(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}
