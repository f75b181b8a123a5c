//! Logging setup and structured request logging

pub mod logging;

pub use logging::{init_tracing, log_request_outcome};
