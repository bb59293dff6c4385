//! Persistence layer: connection pool, migrations, row models and
//! repositories for users, categories and tasks.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod models;
pub mod repositories;

pub use config::DatabaseConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the given configuration.
///
/// Every round trip is bounded by `config.query_timeout`: it is used both as
/// the pool acquire timeout and as the Postgres `statement_timeout` of every
/// pooled connection. A timed-out call surfaces as an ordinary `sqlx::Error`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let statement_timeout_ms = config.query_timeout.as_millis().to_string();
    let options = config
        .connect_options()?
        .options([("statement_timeout", statement_timeout_ms)]);

    tracing::debug!(
        max_connections = config.max_connections,
        query_timeout_ms = config.query_timeout.as_millis() as u64,
        "Opening database pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded SQL migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
