//! API route configuration.

use crate::api::handlers::{get_country_handler, health_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes of the service.
///
/// # Endpoints
///
/// - `GET /getcountry?ip=<address>` - Country code for an IP address
/// - `GET /health`                  - Cache and database status
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/getcountry", get(get_country_handler))
        .route("/health", get(health_handler))
}
