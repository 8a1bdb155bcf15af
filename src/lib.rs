//! # Geo Country
//!
//! Resolves IP addresses to country codes using a local MaxMind database as
//! the source of truth and Redis as a cache-aside layer.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Country codes, resolutions and the lookup trait
//! - **Application Layer** ([`application`]) - Cache-aside resolution logic
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis/in-memory cache and MaxMind reader
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `GET /getcountry?ip=8.8.8.8` → `{"ip":"8.8.8.8","country":{"iso_code":"US"}}`
//! - `GET /health`
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_ADDRESS="localhost:6379"
//! cargo run -- --config config.yaml
//! ```
//!
//! ## Configuration
//!
//! See [`config`] for the file format and environment overrides.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ResolveError, ResolverService, ResolverSettings};
    pub use crate::domain::entities::{CountryCode, Resolution, ResolutionSource};
    pub use crate::domain::repositories::{GeoLookup, GeoLookupError, GeoMetadata};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheError, CacheLookup, CacheService, MemoryCache};
    pub use crate::state::AppState;
}
