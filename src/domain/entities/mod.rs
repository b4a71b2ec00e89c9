//! Core domain entities.
//!
//! Entities are plain data structures; persistence details live in
//! `crate::infrastructure::persistence`.
//!
//! - [`Link`] - A stored short code mapping with its click counters
//! - [`NewLink`] - Input for creating a link
//! - [`LinkStats`] - Read model returned by the stats endpoint

pub mod link;

pub use link::{Link, LinkStats, NewLink};
