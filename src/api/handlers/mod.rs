//! HTTP request handlers for API endpoints.

pub mod country;
pub mod health;

pub use country::get_country_handler;
pub use health::health_handler;
