//! Domain layer containing the resolution model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Country codes and resolution outcomes
//! - [`repositories`] - Read-only geolocation lookup trait
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Lookup traits define contracts implemented by the infrastructure layer
//! - Resolution logic lives in [`crate::application::services`]

pub mod entities;
pub mod repositories;
