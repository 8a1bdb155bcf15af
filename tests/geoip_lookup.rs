//! Lookups against a small MaxMind database in `tests/fixtures`.
//!
//! The fixture is an IPv4 tree with:
//! - `8.0.0.0/8` mapped to a full country record (`US`)
//! - `1.0.0.0/8` with a country but no `iso_code`
//! - `2.0.0.0/8` with no country at all
//! - `3.0.0.0/8` pointing outside the data section
//!
//! Every other address has no record.

use geo_country::application::services::{ResolveError, ResolverService, ResolverSettings};
use geo_country::domain::repositories::{GeoLookup, GeoLookupError};
use geo_country::infrastructure::cache::{CacheLookup, CacheService, MemoryCache};
use geo_country::infrastructure::geoip::MaxMindGeoLookup;
use std::net::IpAddr;
use std::sync::Arc;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/geo-country-test.mmdb"
);

fn open_fixture() -> MaxMindGeoLookup {
    MaxMindGeoLookup::from_file(FIXTURE).unwrap()
}

fn addr(ip: &str) -> IpAddr {
    ip.parse().unwrap()
}

#[tokio::test]
async fn test_lookup_known_country() {
    let geo = open_fixture();

    let code = geo.lookup(addr("8.8.8.8")).await.unwrap();

    assert_eq!(code.as_str(), "US");
}

#[tokio::test]
async fn test_lookup_country_without_iso_code_is_unknown() {
    let geo = open_fixture();

    let code = geo.lookup(addr("1.1.1.1")).await.unwrap();

    assert!(code.is_unknown());
}

#[tokio::test]
async fn test_lookup_record_without_country_is_unknown() {
    let geo = open_fixture();

    let code = geo.lookup(addr("2.2.2.2")).await.unwrap();

    assert!(code.is_unknown());
}

#[tokio::test]
async fn test_lookup_address_not_in_database_is_unknown() {
    let geo = open_fixture();

    assert!(geo.lookup(addr("9.9.9.9")).await.unwrap().is_unknown());
    assert!(geo.lookup(addr("192.168.1.1")).await.unwrap().is_unknown());
}

#[tokio::test]
async fn test_lookup_corrupt_record_is_database_error() {
    let geo = open_fixture();

    let result = geo.lookup(addr("3.3.3.3")).await;

    assert!(matches!(result, Err(GeoLookupError::Database(_))));
}

#[test]
fn test_metadata_describes_fixture() {
    let geo = open_fixture();

    let meta = geo.metadata();

    assert_eq!(meta.database_type, "GeoCountry-Test");
    assert_eq!(meta.build_epoch, 1_718_000_000);
    assert_eq!(meta.ip_version, 4);
}

#[test]
fn test_from_bytes_matches_from_file() {
    let bytes = std::fs::read(FIXTURE).unwrap();

    let geo = MaxMindGeoLookup::from_bytes(bytes).unwrap();

    assert_eq!(geo.metadata(), open_fixture().metadata());
}

#[tokio::test]
async fn test_resolver_over_database_caches_only_successes() {
    let cache = Arc::new(MemoryCache::new());
    let resolver = ResolverService::new(
        Arc::new(open_fixture()),
        cache.clone(),
        ResolverSettings::default(),
    );

    let found = resolver.resolve("8.8.8.8").await.unwrap();
    let unknown = resolver.resolve("1.1.1.1").await.unwrap();
    let failed = resolver.resolve("3.3.3.3").await;

    assert_eq!(found.country.as_str(), "US");
    assert!(unknown.country.is_unknown());
    assert!(matches!(
        failed,
        Err(ResolveError::Resolution(GeoLookupError::Database(_)))
    ));
    assert!(matches!(
        cache.get_country("1.1.1.1").await.unwrap(),
        CacheLookup::Hit(code) if code.is_unknown()
    ));
    assert_eq!(
        cache.get_country("3.3.3.3").await.unwrap(),
        CacheLookup::Miss
    );
}
