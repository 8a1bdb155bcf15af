//! Country code value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Country identifier returned by the geolocation database.
///
/// Usually an ISO 3166-1 alpha-2 code such as `"US"`. An empty code means the
/// database holds no country for the address; that is a valid answer and not
/// an error. No further validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code used when the database has no country for an address.
    pub fn unknown() -> Self {
        Self(String::new())
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_empty() {
        let code = CountryCode::unknown();
        assert!(code.is_unknown());
        assert_eq!(code.as_str(), "");
        assert_eq!(code, CountryCode::default());
    }

    #[test]
    fn test_known_code() {
        let code = CountryCode::from("US");
        assert!(!code.is_unknown());
        assert_eq!(code.to_string(), "US");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&CountryCode::new("DE")).unwrap();
        assert_eq!(json, "\"DE\"");
    }
}
