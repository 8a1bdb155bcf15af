//! Resolution outcome entity.

use super::CountryCode;

/// Where a resolved country code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Served from the result cache without touching the database.
    Cache,
    /// Looked up in the geolocation database on a cache miss.
    Database,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }
}

/// A successfully resolved address.
///
/// Built fresh for every request and dropped once the response is rendered.
/// `ip` is the address exactly as the client supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ip: String,
    pub country: CountryCode,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn new(ip: impl Into<String>, country: CountryCode, source: ResolutionSource) -> Self {
        Self {
            ip: ip.into(),
            country,
            source,
        }
    }

    /// Returns true if the value was served from cache.
    pub fn is_cached(&self) -> bool {
        self.source == ResolutionSource::Cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_from_cache() {
        let resolution = Resolution::new("8.8.8.8", CountryCode::from("US"), ResolutionSource::Cache);
        assert!(resolution.is_cached());
        assert_eq!(resolution.source.as_str(), "cache");
    }

    #[test]
    fn test_resolution_from_database() {
        let resolution =
            Resolution::new("::1", CountryCode::unknown(), ResolutionSource::Database);
        assert!(!resolution.is_cached());
        assert!(resolution.country.is_unknown());
        assert_eq!(resolution.source.as_str(), "database");
    }
}
