//! In-process cache implementation.

use super::service::{CacheLookup, CacheResult, CacheService};
use crate::domain::entities::CountryCode;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    country: CountryCode,
    expires_at: Instant,
}

/// A cache held in process memory.
///
/// Mirrors the Redis semantics the resolver relies on: entries expire after
/// their TTL and a write to an existing key resets it. Expiry is measured with
/// [`tokio::time::Instant`], so tests can drive it with a paused clock.
///
/// Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using MemoryCache");
        Self::default()
    }

    /// Number of stored entries, including ones that expired but were not read since.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_country(&self, key: &str) -> CacheResult<CacheLookup> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(CacheLookup::Miss),
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Ok(CacheLookup::Hit(entry.country.clone()));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        // Re-check under the write lock, a concurrent set may have refreshed it.
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Ok(CacheLookup::Hit(entry.country.clone()));
            }
            entries.remove(key);
            debug!("MemoryCache EXPIRED: {}", key);
        }
        Ok(CacheLookup::Miss)
    }

    async fn set_country(
        &self,
        key: &str,
        country: &CountryCode,
        ttl: Duration,
    ) -> CacheResult<()> {
        let entry = Entry {
            country: country.clone(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
