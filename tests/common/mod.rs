#![allow(dead_code)]

use async_trait::async_trait;
use geo_country::application::services::ResolverSettings;
use geo_country::domain::entities::CountryCode;
use geo_country::domain::repositories::{GeoLookup, GeoLookupError, GeoMetadata};
use geo_country::infrastructure::cache::{
    CacheError, CacheLookup, CacheResult, CacheService, MemoryCache,
};
use geo_country::state::AppState;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory stand-in for the MaxMind database.
pub struct StubGeo {
    countries: HashMap<IpAddr, String>,
    corrupt: HashSet<IpAddr>,
    calls: AtomicUsize,
}

impl StubGeo {
    pub fn new() -> Self {
        Self {
            countries: HashMap::new(),
            corrupt: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_country(mut self, ip: &str, code: &str) -> Self {
        self.countries.insert(ip.parse().unwrap(), code.to_string());
        self
    }

    /// Lookups of `ip` fail as if the record were unreadable.
    pub fn with_corrupt(mut self, ip: &str) -> Self {
        self.corrupt.insert(ip.parse().unwrap());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLookup for StubGeo {
    async fn lookup(&self, addr: IpAddr) -> Result<CountryCode, GeoLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.corrupt.contains(&addr) {
            return Err(GeoLookupError::Database(
                "invalid data in search tree".to_string(),
            ));
        }
        Ok(self
            .countries
            .get(&addr)
            .map(|code| CountryCode::from(code.as_str()))
            .unwrap_or_default())
    }

    fn metadata(&self) -> GeoMetadata {
        GeoMetadata {
            database_type: "GeoLite2-Country".to_string(),
            build_epoch: 1_718_000_000,
            ip_version: 6,
        }
    }
}

/// Cache whose backend is unreachable.
pub struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get_country(&self, _key: &str) -> CacheResult<CacheLookup> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set_country(
        &self,
        _key: &str,
        _country: &CountryCode,
        _ttl: Duration,
    ) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Cache whose backend accepts connections but never answers.
pub struct StalledCache;

const STALL: Duration = Duration::from_secs(3600);

#[async_trait]
impl CacheService for StalledCache {
    async fn get_country(&self, _key: &str) -> CacheResult<CacheLookup> {
        tokio::time::sleep(STALL).await;
        Ok(CacheLookup::Miss)
    }

    async fn set_country(
        &self,
        _key: &str,
        _country: &CountryCode,
        _ttl: Duration,
    ) -> CacheResult<()> {
        tokio::time::sleep(STALL).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        tokio::time::sleep(STALL).await;
        true
    }
}

/// Populated database: Google DNS in the US, one IPv6 address in Germany.
pub fn populated_geo() -> Arc<StubGeo> {
    Arc::new(
        StubGeo::new()
            .with_country("8.8.8.8", "US")
            .with_country("2a00:1450:4001:81b::200e", "DE")
            .with_corrupt("203.0.113.7"),
    )
}

pub fn create_test_state(geo: Arc<StubGeo>, cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(geo, cache, ResolverSettings::default())
}

/// State over [`populated_geo`] and an empty [`MemoryCache`], returning handles to both.
pub fn create_default_state() -> (AppState, Arc<StubGeo>, Arc<MemoryCache>) {
    let geo = populated_geo();
    let cache = Arc::new(MemoryCache::new());
    let state = create_test_state(geo.clone(), cache.clone());
    (state, geo, cache)
}
