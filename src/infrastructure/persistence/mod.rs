//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `FromRow` row types, so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgHostingRepository`] - Subdomain bindings
//! - [`PgTokenRepository`] - Sign-in token storage and validation

pub mod pg_hosting_repository;
pub mod pg_token_repository;

pub use pg_hosting_repository::PgHostingRepository;
pub use pg_token_repository::PgTokenRepository;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

const CONNECT_ATTEMPTS: usize = 5;

/// Connects to PostgreSQL, retrying with exponential backoff, and applies
/// pending migrations.
///
/// # Errors
///
/// Returns an error if every connection attempt fails or a migration fails.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    let pool = Retry::spawn(strategy, || async {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}
