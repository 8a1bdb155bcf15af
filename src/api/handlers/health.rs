//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tokio::time::timeout;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The cache fails or does not answer in time
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "cache": { "status": "ok", "message": "Cache connected" },
///     "geoip": { "status": "ok", "message": "GeoLite2-Country, built 1718000000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_cache(&state).await;
    let geoip_check = check_geoip(&state);

    let all_healthy = cache_check.is_ok() && geoip_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: cache_check,
            geoip: geoip_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks cache connectivity, bounded by the resolver's cache timeout.
async fn check_cache(state: &AppState) -> CheckStatus {
    let limit = state.resolver.settings().cache_timeout;
    match timeout(limit, state.cache.health_check()).await {
        Ok(true) => CheckStatus::ok("Cache connected"),
        Ok(false) => CheckStatus::error("Cache connection failed"),
        Err(_) => CheckStatus::error(format!(
            "Cache did not answer within {}ms",
            limit.as_millis()
        )),
    }
}

/// Reports the loaded database; it is opened at startup and cannot go away.
fn check_geoip(state: &AppState) -> CheckStatus {
    let meta = state.geo.metadata();
    CheckStatus::ok(format!("{}, built {}", meta.database_type, meta.build_epoch))
}
