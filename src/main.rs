use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};

use old_school::logging::init_tracing;
use old_school::old_school_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use old_school::old_school_db::{close_db_pool, init_db_pool, run_migrations};
use old_school::router::init_router;
use old_school::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env();

    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(db.clone(), jwt_config, CorsConfig::from_env());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address()))?;

    info!("Old-school listening on port: {}", server_config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    close_db_pool(&db).await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
