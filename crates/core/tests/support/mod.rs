//! Shared test helpers for `ecotrack-core` integration tests.

pub mod stores;
