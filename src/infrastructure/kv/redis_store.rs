//! Redis-backed remote key-value store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::RemoteKeyValueStore;
use crate::error::RegistrarError;

/// Per-user key-value store in Redis.
///
/// Keys are namespaced as `registrar:<user>:<key>`. Uses `ConnectionManager`
/// for automatic reconnects. Unlike a cache, errors are returned to the caller,
/// which decides whether they matter.
pub struct RedisKeyValueStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisKeyValueStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, RegistrarError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            RegistrarError::persistence(format!("Failed to create Redis client: {e}"))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            RegistrarError::persistence(format!("Failed to connect to Redis: {e}"))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RegistrarError::persistence(format!("Redis PING failed: {e}")))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "registrar:".to_string(),
        })
    }

    fn build_key(&self, user: &str, key: &str) -> String {
        format!("{}{}:{}", self.key_prefix, user, key)
    }
}

#[async_trait]
impl RemoteKeyValueStore for RedisKeyValueStore {
    async fn set(&self, user: &str, key: &str, value: &str) -> Result<(), RegistrarError> {
        let full_key = self.build_key(user, key);
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(&full_key, value)
            .await
            .map_err(|e| RegistrarError::persistence(format!("Redis SET failed: {e}")))?;

        debug!(key = %full_key, "KV SET");
        Ok(())
    }

    async fn get(&self, user: &str, key: &str) -> Result<Option<String>, RegistrarError> {
        let full_key = self.build_key(user, key);
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| RegistrarError::persistence(format!("Redis GET failed: {e}")))?;

        match &value {
            Some(_) => debug!(key = %full_key, "KV HIT"),
            None => debug!(key = %full_key, "KV MISS"),
        }

        Ok(value)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
