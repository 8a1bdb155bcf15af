//! MaxMind GeoIP lookup.
//!
//! Implements [`GeoLookup`] over a GeoLite2/GeoIP2 Country (or City) database.

use crate::domain::entities::CountryCode;
use crate::domain::repositories::{GeoLookup, GeoLookupError, GeoMetadata};
use async_trait::async_trait;
use maxminddb::Reader;
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CountryFields {
    iso_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    country: Option<CountryFields>,
}

/// MaxMind GeoIP lookup.
///
/// The database is read fully into memory once and never modified, so the
/// reader is shared by concurrent lookups without locking.
pub struct MaxMindGeoLookup {
    reader: Reader<Vec<u8>>,
}

impl MaxMindGeoLookup {
    /// Load a GeoIP database from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let reader = Reader::open_readfile(path).map_err(|e| {
            anyhow::anyhow!("failed to open GeoIP database {}: {}", path.display(), e)
        })?;
        Ok(Self { reader })
    }

    /// Load a GeoIP database from raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)
            .map_err(|e| anyhow::anyhow!("invalid GeoIP database: {}", e))?;
        Ok(Self { reader })
    }
}

#[async_trait]
impl GeoLookup for MaxMindGeoLookup {
    async fn lookup(&self, addr: IpAddr) -> Result<CountryCode, GeoLookupError> {
        let record = self
            .reader
            .lookup::<CountryRecord>(addr)
            .map_err(|e| GeoLookupError::Database(e.to_string()))?;

        let code = record
            .and_then(|r| r.country)
            .and_then(|c| c.iso_code)
            .map(CountryCode::from)
            .unwrap_or_default();

        if code.is_unknown() {
            debug!("No country recorded for {}", addr);
        }

        Ok(code)
    }

    fn metadata(&self) -> GeoMetadata {
        let meta = &self.reader.metadata;
        GeoMetadata {
            database_type: meta.database_type.clone(),
            build_epoch: meta.build_epoch,
            ip_version: meta.ip_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_nonexistent() {
        let result = MaxMindGeoLookup::from_file("/nonexistent/path/GeoLite2-Country.mmdb");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = MaxMindGeoLookup::from_bytes(b"definitely not an mmdb file".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_rejects_non_database_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"plain text").unwrap();

        let result = MaxMindGeoLookup::from_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MaxMindGeoLookup>();
    }
}
