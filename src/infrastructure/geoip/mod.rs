//! Geolocation database adapters.

mod maxmind_geo_lookup;

pub use maxmind_geo_lookup::MaxMindGeoLookup;
