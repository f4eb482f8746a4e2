//! Network probe used by the availability checker.

use crate::error::RegistrarError;
use async_trait::async_trait;

/// Reads the page served at a candidate's public URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpAvailabilityProbe`] - reqwest-based GET
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Fetches `url` and returns the response body whatever the status code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Network`] on transport or body read failure.
    async fn fetch_body(&self, url: &str) -> Result<String, RegistrarError>;
}
