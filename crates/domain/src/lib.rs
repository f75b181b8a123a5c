//! # EcoTrack Domain
//!
//! Records and settings shared by every EcoTrack crate.
//!
//! This crate contains:
//! - Request/response records of the `/v1` REST contract
//! - Domain error type and Result alias
//! - Configuration structures
//! - Contract constants (limits, storage keys, defaults)
//!
//! ## Architecture
//! - No dependencies on other EcoTrack crates
//! - Only external dependencies allowed
//! - Pure data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
