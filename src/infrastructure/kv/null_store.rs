//! Disabled remote store.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::RemoteKeyValueStore;
use crate::error::RegistrarError;

/// A remote store that stores nothing.
///
/// Used when Redis is not configured. Reports itself disabled so the
/// preference façade keeps every session on the local store.
pub struct NullKeyValueStore;

impl NullKeyValueStore {
    pub fn new() -> Self {
        debug!("Using NullKeyValueStore (remote preferences disabled)");
        Self
    }
}

impl Default for NullKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteKeyValueStore for NullKeyValueStore {
    async fn set(&self, _user: &str, _key: &str, _value: &str) -> Result<(), RegistrarError> {
        Ok(())
    }

    async fn get(&self, _user: &str, _key: &str) -> Result<Option<String>, RegistrarError> {
        Ok(None)
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        true
    }
}
