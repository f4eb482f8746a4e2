//! Hosting server initialization and runtime setup.
//!
//! Serves every bound subdomain's folder from local storage and answers
//! unbound names with the not-found page the availability probe looks for.

use crate::config::Config;
use crate::infrastructure::kv;
use crate::infrastructure::persistence::{self, PgHostingRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the hosting server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retry) and migrations
/// - Redis preference store (or the disabled store), for health reporting
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - No database is configured or the connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(config.require_database_url()?, config.db_max_connections).await?;
    let hosting = Arc::new(PgHostingRepository::new(Arc::new(pool)));

    let remote_store = kv::connect_remote(config.redis_url.as_deref()).await;

    tokio::fs::create_dir_all(&config.storage_root).await?;

    let state = AppState::new(
        hosting,
        remote_store,
        config.site_address(),
        config.storage_root.clone(),
    );

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    tracing::info!(
        "Serving sites at {}://<name>.{}",
        config.site_scheme,
        config.shared_domain
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
