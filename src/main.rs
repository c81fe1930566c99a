use std::sync::Arc;

use anyhow::Context;
use autoescola::autoescola_config::{
    CorsConfig, DatabaseConfig, JwtConfig, ServerConfig, SessionConfig,
};
use autoescola::autoescola_core::warm_up_password_hashing;
use autoescola::autoescola_db::{init_db_pool, run_migrations};
use autoescola::autoescola_observability::{init_metrics, init_tracing};
use autoescola::router::init_router;
use autoescola::state::AppState;
use autoescola::store::PgStore;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env().context("invalid server configuration")?;
    let session_config = SessionConfig::from_env().context("invalid admin session configuration")?;
    let jwt_config = JwtConfig::from_env().context("invalid JWT configuration")?;
    let database_config = DatabaseConfig::from_env().context("invalid database configuration")?;
    let cors_config = CorsConfig::from_env().context("invalid CORS configuration")?;

    let pool = init_db_pool(&database_config)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let hashing_ready = tokio::task::spawn_blocking(warm_up_password_hashing)
        .await
        .context("password hashing warm-up panicked")?;
    if !hashing_ready {
        tracing::warn!("dummy password hash unavailable, login timing is not equalized");
    }

    let state = AppState::new(
        Arc::new(PgStore::new(pool.clone())),
        session_config,
        &jwt_config,
        cors_config,
    )
    .with_metrics(init_metrics());
    let app = init_router(state);

    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        %address,
        environment = %server_config.environment,
        secure_cookies = server_config.is_production(),
        "server listening"
    );
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
