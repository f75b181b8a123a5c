//! HTTP transport for the EcoTrack REST API

pub mod client;
pub mod request;
pub mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use request::{RequestBody, RequestDescriptor, RequestDescriptorBuilder};
pub use response::{FailedResponse, HttpResponse, TransportFailure};
