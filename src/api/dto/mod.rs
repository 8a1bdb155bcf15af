//! Data Transfer Objects for API requests and responses.

pub mod country;
pub mod health;
