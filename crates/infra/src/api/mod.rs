//! EcoTrack REST API client
//!
//! One module per backend resource area, all borrowing a shared
//! [`ApiClient`]. Every operation follows the same flow:
//!
//! - Validate arguments locally; a rejected call never touches the network
//! - Dispatch through the HTTP wrapper (auth header, timeout, classification)
//! - Check the response shape before decoding it into domain records
//!
//! Analytics reads go through the in-flight map so identical concurrent
//! calls share one network request.

pub mod activities;
pub mod analytics;
pub mod auth;
pub mod client;
pub mod coalesce;
pub mod emissions;
pub mod errors;
pub mod factors;
pub mod ingest;
pub mod reports;
pub mod shape;
pub mod tenants;

pub use activities::ActivitiesApi;
pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use client::{ApiClient, ApiClientBuilder};
pub use coalesce::RequestCoalescer;
pub use emissions::EmissionsApi;
pub use errors::{classify, ApiError, ApiErrorCategory};
pub use factors::FactorsApi;
pub use ingest::{check_upload_size, IngestApi};
pub use reports::ReportsApi;
pub use tenants::TenantsApi;

use ecotrack_common::Validator;
use tracing::warn;

/// Turn collected validation failures into an [`ApiError::Validation`]
pub(crate) fn finish_validation(operation: &'static str, validator: Validator) -> Result<(), ApiError> {
    validator.finalize().map_err(|errors| {
        let err = ApiError::from(errors);
        warn!(operation, error = %err, "request rejected before dispatch");
        err
    })
}

/// Discard the parsed value of a check that returns one
pub(crate) fn unit<T>(outcome: Result<T, String>) -> Result<(), String> {
    outcome.map(|_| ())
}
