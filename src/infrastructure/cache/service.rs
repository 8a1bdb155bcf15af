//! Cache service trait and error types.

use crate::domain::entities::CountryCode;
use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("operation error: {0}")]
    Operation(String),
    #[error("operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Outcome of a successful cache read.
///
/// Backend failures are reported separately as [`CacheError`], so a caller
/// can always tell "not cached" apart from "cache unavailable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(CountryCode),
    Miss,
}

/// Trait for caching resolved country codes keyed by IP address.
///
/// Implementations must be safe for concurrent use; callers add no locking.
/// Unlike a fail-open cache, errors are returned to the caller, who decides
/// whether they are fatal.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads the cached country for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(CacheLookup::Hit(code))` on cache hit (the code may be unknown/empty)
    /// - `Ok(CacheLookup::Miss)` if the key is absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on connectivity or backend failure.
    async fn get_country(&self, key: &str) -> CacheResult<CacheLookup>;

    /// Stores `country` under `key` for `ttl`.
    ///
    /// Overwriting an existing key is allowed and resets its TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write fails.
    async fn set_country(
        &self,
        key: &str,
        country: &CountryCode,
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
