//! Lookup trait for the geolocation database.

use crate::domain::entities::CountryCode;
use async_trait::async_trait;
use std::net::IpAddr;

/// Errors raised by a geolocation lookup.
///
/// "No country known" is not an error; it is reported as
/// [`CountryCode::unknown`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoLookupError {
    /// The record could not be read or decoded.
    #[error("{0}")]
    Database(String),
    /// The lookup did not complete within the configured bound.
    #[error("lookup timed out after {0}ms")]
    Timeout(u64),
}

/// Descriptive metadata of the loaded database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoMetadata {
    pub database_type: String,
    pub build_epoch: u64,
    pub ip_version: u16,
}

/// Read-only mapping from an address to a country.
///
/// Implementations receive already-parsed addresses and must be safe for
/// concurrent use.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::MaxMindGeoLookup`] - MaxMind `.mmdb` reader
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Looks up the country for `addr`.
    ///
    /// # Returns
    ///
    /// - `Ok(code)` with a known code
    /// - `Ok(CountryCode::unknown())` if the database has no country for the address
    ///
    /// # Errors
    ///
    /// Returns [`GeoLookupError::Database`] when the record is corrupt or unreadable.
    async fn lookup(&self, addr: IpAddr) -> Result<CountryCode, GeoLookupError>;

    /// Describes the loaded database, used by health checks.
    fn metadata(&self) -> GeoMetadata;
}
