//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks are hand-written rather than generated: tests need to script
//! page responses in order and hold individual responses back, which is
//! simpler to express directly than through expectation macros.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
