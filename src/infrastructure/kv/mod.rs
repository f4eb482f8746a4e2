//! Key-value stores for the folder preference.
//!
//! - [`RedisKeyValueStore`] - Remote per-user store backed by Redis
//! - [`NullKeyValueStore`] - Disabled remote store, used when Redis is not configured
//! - [`FileKeyValueStore`] - Machine-local JSON file store

mod file_store;
mod null_store;
mod redis_store;

pub use file_store::FileKeyValueStore;
pub use null_store::NullKeyValueStore;
pub use redis_store::RedisKeyValueStore;

use std::sync::Arc;

use crate::domain::repositories::RemoteKeyValueStore;

/// Connects the remote store, falling back to [`NullKeyValueStore`] when
/// Redis is not configured or unreachable.
pub async fn connect_remote(redis_url: Option<&str>) -> Arc<dyn RemoteKeyValueStore> {
    let Some(redis_url) = redis_url else {
        tracing::info!("Remote preferences disabled (no Redis configured)");
        return Arc::new(NullKeyValueStore::new());
    };

    match RedisKeyValueStore::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Remote preferences enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using local preferences only.", e);
            Arc::new(NullKeyValueStore::new())
        }
    }
}
