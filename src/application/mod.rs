//! Application layer services implementing the resolution logic.
//!
//! Services consume the geolocation and cache traits and provide a clean API
//! for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolver_service::ResolverService`] - Cache-aside IP to country resolution

pub mod services;
