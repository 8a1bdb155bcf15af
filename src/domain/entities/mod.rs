//! Core domain entities for IP geolocation.
//!
//! - [`CountryCode`] - Opaque country identifier, possibly unknown
//! - [`Resolution`] - The successful outcome of resolving an address

pub mod country;
pub mod resolution;

pub use country::CountryCode;
pub use resolution::{Resolution, ResolutionSource};
