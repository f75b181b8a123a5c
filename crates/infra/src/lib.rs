//! # EcoTrack Infrastructure
//!
//! Client-side access layer for the EcoTrack REST API.
//!
//! This crate contains:
//! - HTTP transport with bearer-token injection and per-call timeouts
//! - Error classification into a fixed taxonomy
//! - De-duplication of identical in-flight reads
//! - One API module per backend resource area
//! - Session stores (memory, JSON file, platform keychain)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements the session port defined in `ecotrack-core`
//! - Uses `ecotrack-common` validators before any network traffic
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory};
pub use errors::InfraError;
pub use http::{HttpClient, RequestDescriptor};
pub use observability::init_tracing;
pub use session::{build_session_manager, FileSessionStore, KeyringSessionStore, MemorySessionStore};
