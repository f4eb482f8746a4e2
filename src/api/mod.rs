//! HTTP layer of the hosting server.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - Site serving and health check
//! - [`middleware`] - Tracing and rate limiting

pub mod dto;
pub mod handlers;
pub mod middleware;
