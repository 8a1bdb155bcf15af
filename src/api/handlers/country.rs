//! Handler for IP to country lookup.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use tracing::debug;

use crate::api::dto::country::{CountryResponse, GetCountryQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves an IP address to its country code.
///
/// # Endpoint
///
/// `GET /getcountry?ip=<address>`
///
/// # Response Codes
///
/// - **200 OK**: `{"ip": "<address>", "country": {"iso_code": "<code>"}}`,
///   with an empty code when the database knows no country
/// - **400 Bad Request**: `Parameter 'ip' is missing` or `Invalid IP address`
/// - **500 Internal Server Error**: cache or database failure
///
/// When `ip` is repeated, the first value is used.
pub async fn get_country_handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<CountryResponse>, AppError> {
    let ip = GetCountryQuery::from_raw(raw_query.as_deref())
        .ip
        .unwrap_or_default();

    let resolution = state.resolver.resolve(&ip).await?;
    debug!(
        ip = %resolution.ip,
        country = %resolution.country,
        source = resolution.source.as_str(),
        "Resolved"
    );

    Ok(Json(resolution.into()))
}
