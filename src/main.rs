//! Balance Service - Main Application Entry Point
//!
//! A REST API server that reports user balances and applies top-ups.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Money**: exact decimals (`rust_decimal`), stored as `NUMERIC(20,2)`
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build the balance service and HTTP router
//! 5. Serve on the configured port until Ctrl-C

use std::sync::Arc;

use rust_balance_web_server::{
    config::Config,
    db,
    routes::{self, AppState},
    services::BalanceService,
    store::postgres::PgAccountStore,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let store = Arc::new(PgAccountStore::new(pool));
    let service = Arc::new(BalanceService::new(store));
    let state = AppState::new(service, config.request_timeout());
    let shutdown = state.shutdown.clone();

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
            // Abort in-flight storage calls; their account locks are released
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
