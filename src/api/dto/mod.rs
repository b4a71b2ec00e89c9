//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the wire contract the browser and terminal clients
//! already speak, hence the mix of camelCase and snake_case.

pub mod health;
pub mod shorten;
pub mod stats;
