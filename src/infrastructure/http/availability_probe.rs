use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::domain::repositories::AvailabilityProbe;
use crate::error::RegistrarError;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads candidate sites over HTTP(S).
///
/// Any response counts, whatever its status: the hosting layer answers
/// unbound names with a 404 page that still carries the body we look for.
#[derive(Debug, Clone)]
pub struct HttpAvailabilityProbe {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpAvailabilityProbe {
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, RegistrarError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("subdomain-registrar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RegistrarError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            timeout: timeout.max(Duration::from_millis(250)),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AvailabilityProbe for HttpAvailabilityProbe {
    async fn fetch_body(&self, url: &str) -> Result<String, RegistrarError> {
        let url = Url::parse(url)
            .map_err(|e| RegistrarError::network(format!("Invalid probe URL {url}: {e}")))?;

        let response = self
            .http
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RegistrarError::network(format!("Request to {url} failed: {e}")))?;

        tracing::debug!(url = %url, status = %response.status(), "Probe response");

        response
            .text()
            .await
            .map_err(|e| RegistrarError::network(format!("Failed to read body from {url}: {e}")))
    }
}
