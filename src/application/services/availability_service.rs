//! Availability checking against the hosting layer's public URLs.

use std::sync::Arc;
use tracing::instrument;

use crate::domain::entities::{AvailabilityVerdict, NOT_FOUND_SENTINEL, SiteAddress, SubdomainName};
use crate::domain::repositories::AvailabilityProbe;
use crate::domain::validation::ValidationError;

/// Decides whether a subdomain is free by reading the page served at its
/// public URL.
///
/// An unbound name serves the hosting layer's not-found page, which carries
/// [`NOT_FOUND_SENTINEL`]. Any other body means the name is bound.
pub struct AvailabilityService<P: AvailabilityProbe + ?Sized> {
    probe: Arc<P>,
    address: SiteAddress,
}

impl<P: AvailabilityProbe + ?Sized> AvailabilityService<P> {
    pub fn new(probe: Arc<P>, address: SiteAddress) -> Self {
        Self { probe, address }
    }

    pub fn address(&self) -> &SiteAddress {
        &self.address
    }

    /// Probes `name` once.
    ///
    /// A transport or body read failure yields a conservative `Taken` verdict
    /// carrying the failure message, so a finished check is never `Unknown`.
    #[instrument(skip(self, name), fields(name = %name))]
    pub async fn check(&self, name: &SubdomainName) -> AvailabilityVerdict {
        let url = self.address.probe_url(name);

        match self.probe.fetch_body(&url).await {
            Ok(body) if body.contains(NOT_FOUND_SENTINEL) => {
                tracing::debug!("Subdomain is available");
                AvailabilityVerdict::available(name.clone())
            }
            Ok(_) => {
                tracing::debug!("Subdomain is taken");
                AvailabilityVerdict::taken(name.clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Availability probe failed");
                AvailabilityVerdict::failed(name.clone(), e.to_string())
            }
        }
    }

    /// Normalizes and validates raw input, then probes it.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] without touching the network when the
    /// input is not a valid label.
    pub async fn check_candidate(&self, input: &str) -> Result<AvailabilityVerdict, ValidationError> {
        let name = SubdomainName::parse(input)?;
        Ok(self.check(&name).await)
    }
}
