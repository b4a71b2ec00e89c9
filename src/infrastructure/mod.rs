//! Storage and cache backends behind the domain repository traits.
//!
//! - [`persistence`] - PostgreSQL `urls` and `counters` tables
//! - [`cache`] - Redis code-to-URL cache, or a no-op when Redis is absent

pub mod cache;
pub mod persistence;
