//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the application layer, providing
//! concrete implementations for caching and geolocation.
//!
//! # Modules
//!
//! - [`cache`] - Result cache abstractions (Redis and in-memory implementations)
//! - [`geoip`] - MaxMind database lookup

pub mod cache;
pub mod geoip;
