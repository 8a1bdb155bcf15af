//! Redis-backed cache implementation.

use super::service::{CacheError, CacheLookup, CacheResult, CacheService};
use crate::domain::entities::CountryCode;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation for resolved country codes.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Values are stored as plain strings; an unknown country is stored as `""`.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    /// - `key_prefix` - Namespace prepended to every key; empty keeps bare IP keys
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_country(&self, key: &str) -> CacheResult<CacheLookup> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", full_key, e)))?;

        Ok(match value {
            Some(code) => {
                debug!("Redis HIT: {} -> '{}'", full_key, code);
                CacheLookup::Hit(CountryCode::from(code))
            }
            None => {
                debug!("Redis MISS: {}", full_key);
                CacheLookup::Miss
            }
        })
    }

    async fn set_country(
        &self,
        key: &str,
        country: &CountryCode,
        ttl: Duration,
    ) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&full_key, country.as_str(), ttl_seconds)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {}: {}", full_key, e)))?;

        debug!(
            "Redis SET: {} -> '{}' (TTL: {}s)",
            full_key, country, ttl_seconds
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
