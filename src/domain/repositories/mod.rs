//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated with `mockall`
//! for unit tests.
//!
//! - [`LinkRepository`] - Short link creation and lookup
//! - [`StatsRepository`] - Click counters
//! - [`SequenceRepository`] - Atomic counters for code generation

pub mod link_repository;
pub mod sequence_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use sequence_repository::{SequenceRepository, URL_SEQUENCE};
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use sequence_repository::MockSequenceRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
