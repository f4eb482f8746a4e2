//! Router of the hosting server.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check: database and preference store
//! - anything else - Files of the subdomain named by the `Host` header
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (proxy-aware when configured)

use axum::Router;
use axum::routing::get;

use crate::api::handlers::{health_handler, site_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;

/// Routes without rate limiting, usable without socket connect info.
pub fn site_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(site_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Full application router.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads the client IP from
///   forwarding headers instead of the peer socket address; enable only
///   behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> Router {
    let router = site_routes(state);

    if behind_proxy {
        router.layer(rate_limit::proxied_layer())
    } else {
        router.layer(rate_limit::layer())
    }
}
