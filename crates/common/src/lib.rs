//! Shared utilities for EcoTrack crates.
//!
//! Currently this is the request validation toolkit used by the API modules
//! to reject malformed input before any network traffic happens.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod validation;

pub use validation::{
    CollectionValidator, EmailValidator, FieldError, FieldValidator, IsoDateValidator,
    RangeValidator, StringValidator, ValidationError, ValidationResult, Validator,
};
