use std::time::Duration;

use ecotrack_domain::{EcoTrackError, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::api::ApiError;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.filter` when set. Fails if a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), EcoTrackError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|err| {
            EcoTrackError::Config(format!("invalid log filter '{}': {err}", config.filter))
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()
    };

    installed.map_err(|err| EcoTrackError::Internal(format!("tracing init failed: {err}")))
}

/// Log the outcome of one API operation with structured fields.
///
/// `operation` is a stable identifier such as `"GET /v1/analytics/kpis"`
/// (see [`crate::http::RequestDescriptor::operation`]); it must not carry query values.
#[inline]
pub fn log_request_outcome<T>(operation: &str, elapsed: Duration, outcome: &Result<T, ApiError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match outcome {
        Ok(_) => info!(operation, duration_ms, "api_request_success"),
        Err(err) => warn!(
            operation,
            duration_ms,
            error_kind = err.kind(),
            status = err.status(),
            error = %err,
            "api_request_failure"
        ),
    }
}
