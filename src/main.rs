//! Bookmarks API server
//!
//! Account signup, signin and 15-minute bearer tokens over a SQLite account store.
//!
//! Environment:
//!   JWT_SECRET   - Token signing secret (required)
//!   BIND_ADDR    - Listen address (default: 0.0.0.0:3333)
//!   AUTH_DB_PATH - Account database (default: bookmarks_auth.db)
//!   RUST_LOG     - Log filter (default: bookmarks_backend=debug,tower_http=debug)

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmarks_backend::{
    api::create_router,
    auth::{AuthState, CredentialService, SqliteAccountStore},
    config::ServerConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = ServerConfig::parse();
    let auth_config = config
        .auth_config()
        .context("Invalid authentication configuration")?;

    info!("🚀 Bookmarks API starting");

    let db_path = config.resolved_db_path();
    let store = Arc::new(SqliteAccountStore::new(&db_path)?);
    let credentials = CredentialService::new(store, &auth_config);

    let app = create_router(AuthState::new(credentials));

    // Start server
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmarks_backend=debug,bookmarks=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate directory (common when running with --manifest-path from elsewhere)
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
