//! Repository trait for sign-in tokens.

use crate::error::RegistrarError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Sign-in token entity with metadata.
///
/// Tokens are stored as HMAC-SHA256 hashes; the raw value is shown once at
/// creation and never persisted.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for sign-in token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the username it was issued for.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(username))` if the token exists and is not revoked
    /// - `Ok(None)` if the token is unknown or revoked
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn find_username(&self, token_hash: &str) -> Result<Option<String>, RegistrarError>;

    /// Updates the last used timestamp for a token.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), RegistrarError>;

    /// Creates a new token for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Conflict`] if the hash already exists.
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn create_token(
        &self,
        username: &str,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, RegistrarError>;

    /// Lists all tokens, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, RegistrarError>;

    /// Finds a token by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, RegistrarError>;

    /// Finds a token by its display name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, RegistrarError>;

    /// Revokes a token by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::NotFound`] if the token does not exist.
    /// Returns [`RegistrarError::Internal`] on database errors.
    async fn revoke_token(&self, id: i64) -> Result<(), RegistrarError>;
}
