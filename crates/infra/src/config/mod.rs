//! Configuration loading
//!
//! Reads the client configuration from a file and `ECOTRACK_*` environment
//! variables.

pub mod loader;

pub use loader::{apply_env_overrides, load, load_from_file, probe_config_paths};
