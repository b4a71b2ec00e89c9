//! Helpers shared by the service layers.
//!
//! - [`code_generator`] - Base62 short codes and custom alias validation
//! - [`url_normalizer`] - Long URL validation and normalization

pub mod code_generator;
pub mod url_normalizer;
