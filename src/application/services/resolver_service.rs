//! Cache-aside IP to country resolution.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{CountryCode, Resolution, ResolutionSource};
use crate::domain::repositories::{GeoLookup, GeoLookupError};
use crate::infrastructure::cache::{CacheError, CacheLookup, CacheService};

/// Default lifetime of a cached country code.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default bound on a single cache or database call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(300);

/// Failure classification of a resolution.
///
/// The `Display` output of each variant is the response body served to clients.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No address was supplied.
    #[error("Parameter 'ip' is missing")]
    MissingParameter,
    /// The supplied value is not an IPv4 or IPv6 address.
    #[error("Invalid IP address")]
    InvalidAddress(String),
    /// The cache could not be read.
    #[error("Cache error: {0}")]
    Cache(#[source] CacheError),
    /// The geolocation database failed to answer.
    #[error("Error processing IP address: {0}")]
    Resolution(#[source] GeoLookupError),
}

impl ResolveError {
    /// Returns true for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameter | Self::InvalidAddress(_))
    }
}

/// Tunables of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Lifetime of entries written back to the cache.
    pub cache_ttl: Duration,
    /// Bound on each cache get/set.
    pub cache_timeout: Duration,
    /// Bound on each database lookup.
    pub lookup_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_timeout: DEFAULT_CALL_TIMEOUT,
            lookup_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Resolves client-supplied addresses to country codes.
///
/// The cache is always consulted first. On a miss the geolocation database is
/// queried and the answer written back with a fixed TTL. Cached values are
/// trusted for their whole lifetime, even if the database changes meanwhile.
///
/// The service holds no mutable state of its own; concurrent calls only share
/// the cache. Two concurrent misses for the same address may both query the
/// database and both write the cache.
pub struct ResolverService {
    geo: Arc<dyn GeoLookup>,
    cache: Arc<dyn CacheService>,
    settings: ResolverSettings,
}

impl ResolverService {
    /// Creates a new resolver service.
    pub fn new(
        geo: Arc<dyn GeoLookup>,
        cache: Arc<dyn CacheService>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            geo,
            cache,
            settings,
        }
    }

    /// Returns the tunables this resolver was built with.
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolves `raw_ip` to a country code.
    ///
    /// # Request Flow
    ///
    /// 1. Reject empty input and unparseable addresses (no cache or database access)
    /// 2. Read the cache; a hit returns immediately
    /// 3. On a miss, look the address up in the database
    /// 4. Write the answer back to the cache (failures are logged, not returned)
    ///
    /// The cache key is the address text exactly as supplied.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MissingParameter`] if `raw_ip` is empty
    /// - [`ResolveError::InvalidAddress`] if `raw_ip` is not an IP address
    /// - [`ResolveError::Cache`] if the cache read fails or times out; the database
    ///   is not consulted in that case
    /// - [`ResolveError::Resolution`] if the database lookup fails or times out;
    ///   nothing is cached in that case
    pub async fn resolve(&self, raw_ip: &str) -> Result<Resolution, ResolveError> {
        debug!("Received request for IP: {}", raw_ip);

        let addr = parse_address(raw_ip)?;

        match self.read_cache(raw_ip).await? {
            CacheLookup::Hit(country) => {
                debug!(
                    "IP {} found in cache, returning cached country code '{}'",
                    raw_ip, country
                );
                return Ok(Resolution::new(raw_ip, country, ResolutionSource::Cache));
            }
            CacheLookup::Miss => {
                debug!("IP {} not found in cache, querying GeoIP database", raw_ip);
            }
        }

        let country = self.lookup(addr).await.map_err(|e| {
            error!("Error processing IP address {}: {}", raw_ip, e);
            ResolveError::Resolution(e)
        })?;
        debug!("Retrieved country code '{}' for IP {}", country, raw_ip);

        self.populate_cache(raw_ip, &country).await;

        Ok(Resolution::new(raw_ip, country, ResolutionSource::Database))
    }

    async fn read_cache(&self, key: &str) -> Result<CacheLookup, ResolveError> {
        let limit = self.settings.cache_timeout;
        timeout(limit, self.cache.get_country(key))
            .await
            .unwrap_or_else(|_| Err(CacheError::Timeout(millis(limit))))
            .map_err(|e| {
                error!("Error retrieving {} from cache: {}", key, e);
                ResolveError::Cache(e)
            })
    }

    async fn lookup(&self, addr: IpAddr) -> Result<CountryCode, GeoLookupError> {
        let limit = self.settings.lookup_timeout;
        timeout(limit, self.geo.lookup(addr))
            .await
            .unwrap_or_else(|_| Err(GeoLookupError::Timeout(millis(limit))))
    }

    async fn populate_cache(&self, key: &str, country: &CountryCode) {
        let limit = self.settings.cache_timeout;
        let ttl = self.settings.cache_ttl;
        let written = timeout(limit, self.cache.set_country(key, country, ttl))
            .await
            .unwrap_or_else(|_| Err(CacheError::Timeout(millis(limit))));

        match written {
            Ok(()) => debug!("Saved country code '{}' for IP {} to cache", country, key),
            Err(e) => warn!("Error saving {} to cache: {}", key, e),
        }
    }
}

fn parse_address(raw_ip: &str) -> Result<IpAddr, ResolveError> {
    if raw_ip.is_empty() {
        info!("Parameter 'ip' is missing");
        return Err(ResolveError::MissingParameter);
    }

    raw_ip.parse::<IpAddr>().map_err(|_| {
        info!("Invalid IP address: {}", raw_ip);
        ResolveError::InvalidAddress(raw_ip.to_string())
    })
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
