//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgStatsRepository`] - Click counters
//! - [`PgSequenceRepository`] - Named counters for code generation

pub mod pg_link_repository;
pub mod pg_sequence_repository;
pub mod pg_stats_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_sequence_repository::PgSequenceRepository;
pub use pg_stats_repository::PgStatsRepository;
