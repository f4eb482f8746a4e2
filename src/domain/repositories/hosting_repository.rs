//! Repository trait for hosting bindings.

use crate::domain::entities::HostingRecord;
use crate::error::RegistrarError;
use async_trait::async_trait;

/// Binds subdomains to storage directories and resolves them for serving.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHostingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_hosting.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostingRepository: Send + Sync {
    /// Binds `subdomain` to `root_dir` on behalf of `owner`.
    ///
    /// Re-binding a subdomain the same owner already holds updates its
    /// directory and succeeds, so a retried registration reissues the
    /// binding instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Conflict`] if another owner holds the subdomain.
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn bind(
        &self,
        owner: &str,
        subdomain: &str,
        root_dir: &str,
    ) -> Result<HostingRecord, RegistrarError>;

    /// Finds the binding for a subdomain label.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn find_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<HostingRecord>, RegistrarError>;

    /// Lists bindings held by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<HostingRecord>, RegistrarError>;

    /// Lists all bindings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<HostingRecord>, RegistrarError>;

    /// Checks that the backing store answers queries.
    async fn health_check(&self) -> bool;
}
