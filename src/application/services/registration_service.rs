//! The registration transaction.
//!
//! Provisioning runs strictly in order: directory, content, file, binding.
//! There is no undo; every step is idempotent so a failed attempt can simply
//! be retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::instrument;

use crate::domain::entities::{HostingRecord, SiteAddress, SubdomainName};
use crate::domain::landing_page;
use crate::domain::repositories::{Filesystem, HostingRepository, MkdirMode};
use crate::error::{ProvisioningStep, RegistrarError};

/// Everything a registration attempt needs, captured at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub owner: String,
    pub subdomain: SubdomainName,
    pub parent_path: String,
}

/// A completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub subdomain: SubdomainName,
    pub target_path: String,
    pub site_url: String,
    pub record: HostingRecord,
}

/// Joins a parent folder and a subdomain without doubling the separator.
pub fn target_path(parent: &str, name: &SubdomainName) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}

/// Releases the in-flight flag on every exit path, including cancellation.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Provisions a folder, publishes the landing page into it and binds the
/// subdomain to it.
///
/// At most one transaction runs at a time per service instance.
pub struct RegistrationService<F: Filesystem + ?Sized, H: HostingRepository + ?Sized> {
    filesystem: Arc<F>,
    hosting: Arc<H>,
    address: SiteAddress,
    in_flight: AtomicBool,
}

impl<F: Filesystem + ?Sized, H: HostingRepository + ?Sized> RegistrationService<F, H> {
    pub fn new(filesystem: Arc<F>, hosting: Arc<H>, address: SiteAddress) -> Self {
        Self {
            filesystem,
            hosting,
            address,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs the transaction.
    ///
    /// # Errors
    ///
    /// - [`RegistrarError::ConcurrencyReject`] immediately, with no side
    ///   effects, when another call has not finished yet
    /// - [`RegistrarError::Provisioning`] naming the failed step. The message
    ///   is the collaborator's own. Later steps are not attempted.
    #[instrument(
        skip(self, request),
        fields(subdomain = %request.subdomain, owner = %request.owner)
    )]
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Registration, RegistrarError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Registration already in flight, ignoring");
            return Err(RegistrarError::ConcurrencyReject);
        };

        let name = &request.subdomain;
        let target = target_path(&request.parent_path, name);

        let created = self
            .filesystem
            .mkdir(&target, MkdirMode::CreateOrReuse)
            .await
            .map_err(|e| step_failed(ProvisioningStep::CreateDirectory, e))?;

        if created != target {
            return Err(step_failed(
                ProvisioningStep::CreateDirectory,
                RegistrarError::storage(format!(
                    "Expected directory {target} but storage created {created}"
                )),
            ));
        }
        tracing::debug!(path = %target, "Directory ready");

        let content = landing_page::render(name, &self.address).map_err(|e| {
            step_failed(
                ProvisioningStep::RenderContent,
                RegistrarError::internal(e.to_string()),
            )
        })?;

        let index_path = format!("{target}/index.html");
        self.filesystem
            .write(&index_path, &content)
            .await
            .map_err(|e| step_failed(ProvisioningStep::WriteContent, e))?;
        tracing::debug!(path = %index_path, "Landing page written");

        let record = self
            .hosting
            .bind(&request.owner, name.as_str(), &target)
            .await
            .map_err(|e| step_failed(ProvisioningStep::BindHosting, e))?;

        let site_url = self.address.site_url(name);
        tracing::info!(url = %site_url, path = %target, "Subdomain registered");

        Ok(Registration {
            subdomain: name.clone(),
            target_path: target,
            site_url,
            record,
        })
    }
}

fn step_failed(step: ProvisioningStep, source: RegistrarError) -> RegistrarError {
    tracing::error!(step = %step, error = %source, "Registration step failed");
    RegistrarError::provisioning(step, source.to_string())
}

/// Registration service over trait objects, as wired by the binaries.
pub type DynRegistrationService = RegistrationService<dyn Filesystem, dyn HostingRepository>;
