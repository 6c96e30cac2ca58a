//! Shared test utilities
//!
//! Fixture runtimes, attribute maps and rule catalogs used across
//! integration tests.

pub mod fixtures;
