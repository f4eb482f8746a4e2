//! Key-value stores backing the folder preference.

use crate::error::RegistrarError;
use async_trait::async_trait;

/// Key under which the approved parent path is persisted.
pub const SELECTED_FOLDER_KEY: &str = "selectedFolderPath";

/// Per-user store that follows the user across devices.
///
/// # Implementations
///
/// - [`crate::infrastructure::kv::RedisKeyValueStore`] - Redis-backed store
/// - [`crate::infrastructure::kv::NullKeyValueStore`] - disabled remote store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteKeyValueStore: Send + Sync {
    /// Stores `value` under `key` for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the write fails.
    async fn set(&self, user: &str, key: &str, value: &str) -> Result<(), RegistrarError>;

    /// Reads `key` for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the read fails.
    async fn get(&self, user: &str, key: &str) -> Result<Option<String>, RegistrarError>;

    /// Whether this store actually persists anything. A disabled store makes
    /// the preference façade use the local store for every session.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Checks backend connectivity.
    async fn health_check(&self) -> bool;
}

/// Machine-local store, shared by every session on this machine.
///
/// Synchronous by contract. Implementations may block the calling thread on
/// disk I/O, including when called from async code.
///
/// # Implementations
///
/// - [`crate::infrastructure::kv::FileKeyValueStore`] - JSON file store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LocalKeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the write fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), RegistrarError>;

    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, RegistrarError>;
}
