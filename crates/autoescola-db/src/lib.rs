//! # Autoescola DB
//!
//! Postgres connection pool lifecycle for the Autoescola API.
//!
//! The pool is created once at boot by the binary, handed to the stores that
//! need it, and closed during graceful shutdown. Nothing in this crate keeps a
//! global handle.
//!
//! # Example
//!
//! ```ignore
//! use autoescola_config::DatabaseConfig;
//! use autoescola_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! // ...
//! pool.close().await;
//! ```

use autoescola_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a Postgres connection pool sized from `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "database pool initialized"
    );

    Ok(pool)
}

/// Applies the embedded SQL migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
