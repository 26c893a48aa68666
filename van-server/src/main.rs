//! van-server: snack van ordering backend
//!
//! Serves the customer and vendor HTTP API over a SQLite store.

use std::net::SocketAddr;

use van_server::config::Config;
use van_server::logger::init_logger_with_file;
use van_server::state::AppState;
use van_server::{api, db};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Starting van-server (env: {})", config.environment);
    if config.is_development() && std::env::var("JWT_SECRET").map_or(true, |v| v.is_empty()) {
        tracing::warn!("JWT_SECRET not set, tokens are signed with a temporary secret");
    }

    let state = AppState::new(&config).await?;
    db::snacks::seed_default_menu(&state.pool).await?;

    let app = api::create_router(state.clone(), config.cors_origin.as_deref());

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("van-server HTTP listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    state.pool.close().await;
    tracing::info!("van-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
    tracing::info!("Shutdown signal received");
}
