//! Lookup trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for read-only data access
//! - Implementations live in `crate::infrastructure::geoip`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod geo_lookup;

pub use geo_lookup::{GeoLookup, GeoLookupError, GeoMetadata};

#[cfg(test)]
pub use geo_lookup::MockGeoLookup;
