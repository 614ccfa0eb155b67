//! PostgreSQL persistence for the cellar catalog.
//!
//! Models mirror the tables in `db/migrations`; repositories are zero-sized
//! structs whose async methods take the pool as their first argument.

pub mod models;
pub mod repositories;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations embedded from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Version of the newest migration embedded in this build.
pub fn latest_migration_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}

/// Version of the newest migration successfully applied to the database.
///
/// `None` when the migrations table exists but is empty. Fails when the
/// database is unreachable or has never been migrated.
pub async fn applied_migration_version(pool: &DbPool) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await
}
