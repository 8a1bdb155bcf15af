//! DTOs for the country lookup endpoint.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::domain::entities::{CountryCode, Resolution};

/// Query string of `GET /getcountry`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GetCountryQuery {
    pub ip: Option<String>,
}

impl GetCountryQuery {
    /// Reads the query from a raw query string.
    ///
    /// Only the first `ip` value counts; repeated parameters and unrelated keys
    /// are ignored. Parsing never fails, so malformed input ends up as a missing
    /// or invalid address rather than a framework rejection.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let ip = raw.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "ip")
                .map(|(_, value)| value.into_owned())
        });
        Self { ip }
    }
}

/// Successful lookup response.
///
/// ```json
/// {"ip": "8.8.8.8", "country": {"iso_code": "US"}}
/// ```
///
/// The shape is identical for cache hits and misses.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryResponse {
    pub ip: String,
    pub country: CountryInfo,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryInfo {
    pub iso_code: CountryCode,
}

impl From<Resolution> for CountryResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            ip: resolution.ip,
            country: CountryInfo {
                iso_code: resolution.country,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResolutionSource;
    use serde_json::json;

    #[test]
    fn test_query_takes_first_ip() {
        let query = GetCountryQuery::from_raw(Some("ip=8.8.8.8&ip=1.1.1.1"));
        assert_eq!(query.ip.as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_query_decodes_percent_encoding() {
        let query = GetCountryQuery::from_raw(Some("lang=en&ip=2001%3Adb8%3A%3A1"));
        assert_eq!(query.ip.as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn test_query_without_ip() {
        assert_eq!(GetCountryQuery::from_raw(None), GetCountryQuery::default());
        assert_eq!(GetCountryQuery::from_raw(Some("addr=8.8.8.8")).ip, None);
        assert_eq!(GetCountryQuery::from_raw(Some("ip=")).ip.as_deref(), Some(""));
    }

    #[test]
    fn test_response_shape() {
        let resolution = Resolution::new("8.8.8.8", CountryCode::from("US"), ResolutionSource::Cache);
        let value = serde_json::to_value(CountryResponse::from(resolution)).unwrap();
        assert_eq!(value, json!({"ip": "8.8.8.8", "country": {"iso_code": "US"}}));
    }

    #[test]
    fn test_unknown_country_serializes_empty() {
        let resolution =
            Resolution::new("10.0.0.1", CountryCode::unknown(), ResolutionSource::Database);
        let value = serde_json::to_value(CountryResponse::from(resolution)).unwrap();
        assert_eq!(value["country"]["iso_code"], "");
    }
}
