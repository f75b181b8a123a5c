//! API-specific error types
//!
//! Every failure of the access layer is an [`ApiError`]. Transport failures
//! are mapped by [`classify`]; validation and response-shape problems are
//! raised locally by the API modules.

use ecotrack_common::validation::ValidationError;
use ecotrack_domain::EcoTrackError;
use serde_json::Value;
use thiserror::Error;

use crate::http::TransportFailure;

/// What the caller can do about an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Bad input or a 4xx response - change the request
    FixInput,
    /// 5xx, connection loss or timeout - the same request may succeed later
    TryLater,
    /// Undecodable or unexpected data - not fixable by the caller
    ContactSupport,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Response with a 4xx status
    #[error("{message}")]
    ClientRequest {
        message: String,
        status: u16,
        status_text: Option<String>,
        body: Option<String>,
    },

    /// Response with a 5xx status
    #[error("{message}")]
    ServerResponse {
        message: String,
        status: u16,
        status_text: Option<String>,
        body: Option<String>,
    },

    /// Body could not be encoded or decoded
    #[error("{message}")]
    Serialization { message: String, cause: Option<String> },

    /// Request dispatched but no response arrived
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Timeout(String),

    /// Input rejected before dispatch
    #[error("{0}")]
    Validation(String),

    /// Well-formed JSON of the wrong shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Anything the classifier does not recognise
    #[error("{0}")]
    Unclassified(String),
}

impl ApiError {
    pub fn serialization(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Serialization { message: message.into(), cause: Some(cause.to_string()) }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::ClientRequest { .. } | Self::Validation(_) => ApiErrorCategory::FixInput,
            Self::ServerResponse { .. } | Self::Connection(_) | Self::Timeout(_) => {
                ApiErrorCategory::TryLater
            }
            Self::Serialization { .. } | Self::InvalidResponse(_) | Self::Unclassified(_) => {
                ApiErrorCategory::ContactSupport
            }
        }
    }

    /// Stable label for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientRequest { .. } => "ClientRequestError",
            Self::ServerResponse { .. } => "ServerResponseError",
            Self::Serialization { .. } => "SerializationError",
            Self::Connection(_) => "ConnectionError",
            Self::Timeout(_) => "TimeoutError",
            Self::Validation(_) => "ValidationError",
            Self::InvalidResponse(_) => "InvalidResponseError",
            Self::Unclassified(_) => "Error",
        }
    }

    /// HTTP status, for errors that came with a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientRequest { status, .. } | Self::ServerResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::ClientRequest { status_text, .. } | Self::ServerResponse { status_text, .. } => {
                status_text.as_deref()
            }
            _ => None,
        }
    }

    /// Raw response body, for errors that came with a response
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::ClientRequest { body, .. } | Self::ServerResponse { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Server-provided `detail` message, when the body is `{"detail": "..."}`
    pub fn detail(&self) -> Option<String> {
        let body: Value = serde_json::from_str(self.body()?).ok()?;
        match body.get("detail")? {
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Map a raw transport failure onto the error taxonomy.
///
/// First match wins: timeout, 4xx response, 5xx response, dispatched without
/// a response, anything else.
pub fn classify(failure: &TransportFailure) -> ApiError {
    if failure.timed_out {
        return ApiError::Timeout(non_empty_or(&failure.message, "Request timed out"));
    }

    if let Some(response) = &failure.response {
        let body = Some(response.body.clone()).filter(|b| !b.is_empty());
        match response.status {
            400..=499 => {
                return ApiError::ClientRequest {
                    message: non_empty_or(&failure.message, "Client error"),
                    status: response.status,
                    status_text: response.status_text.clone(),
                    body,
                };
            }
            500.. => {
                return ApiError::ServerResponse {
                    message: non_empty_or(&failure.message, "Server error"),
                    status: response.status,
                    status_text: response.status_text.clone(),
                    body,
                };
            }
            _ => {}
        }
    } else if failure.request_sent {
        return ApiError::Connection(non_empty_or(&failure.message, "No response received"));
    }

    ApiError::Unclassified(non_empty_or(&failure.message, "Unknown error"))
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        classify(&failure)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.message())
    }
}

/// Session storage and configuration problems surface unclassified
impl From<EcoTrackError> for ApiError {
    fn from(err: EcoTrackError) -> Self {
        Self::Unclassified(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FailedResponse;

    fn with_status(status: u16, body: &str) -> TransportFailure {
        TransportFailure::from_response(FailedResponse {
            status,
            status_text: Some("Status".into()),
            body: body.into(),
        })
    }

    #[test]
    fn test_timeout_wins() {
        let mut failure = with_status(503, "");
        failure.timed_out = true;
        failure.message = String::new();

        assert_eq!(classify(&failure), ApiError::Timeout("Request timed out".into()));
    }

    #[test]
    fn test_client_errors() {
        let err = classify(&with_status(404, r#"{"detail":"Not found"}"#));

        assert_eq!(err.kind(), "ClientRequestError");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.status_text(), Some("Status"));
        assert_eq!(err.to_string(), "Request failed with status code 404");
        assert_eq!(err.detail().as_deref(), Some("Not found"));
        assert_eq!(err.category(), ApiErrorCategory::FixInput);
    }

    #[test]
    fn test_server_errors() {
        let err = classify(&with_status(503, ""));

        assert!(matches!(err, ApiError::ServerResponse { status: 503, body: None, .. }));
        assert_eq!(err.category(), ApiErrorCategory::TryLater);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_sent_without_response_is_connection() {
        let failure = TransportFailure {
            message: "Connection failed: connection refused".into(),
            timed_out: false,
            request_sent: true,
            response: None,
        };

        assert_eq!(
            classify(&failure),
            ApiError::Connection("Connection failed: connection refused".into())
        );
    }

    #[test]
    fn test_connection_default_message() {
        let failure =
            TransportFailure { message: String::new(), timed_out: false, request_sent: true, response: None };
        assert_eq!(classify(&failure), ApiError::Connection("No response received".into()));
    }

    #[test]
    fn test_unsent_and_non_error_status_fall_through() {
        let unsent = TransportFailure::not_sent("Invalid request URL: empty host");
        assert_eq!(classify(&unsent), ApiError::Unclassified("Invalid request URL: empty host".into()));

        let redirect = with_status(304, "");
        assert_eq!(classify(&redirect).kind(), "Error");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Validation("x".into()).category(), ApiErrorCategory::FixInput);
        assert_eq!(ApiError::Connection("x".into()).category(), ApiErrorCategory::TryLater);
        assert_eq!(ApiError::Timeout("x".into()).category(), ApiErrorCategory::TryLater);
        assert_eq!(
            ApiError::InvalidResponse("x".into()).category(),
            ApiErrorCategory::ContactSupport
        );
        assert_eq!(
            ApiError::serialization("bad body", "eof").category(),
            ApiErrorCategory::ContactSupport
        );
        assert_eq!(ApiError::Unclassified("x".into()).category(), ApiErrorCategory::ContactSupport);
    }

    #[test]
    fn test_validation_keeps_message() {
        let err: ApiError =
            ValidationError::field("category", "Factor category is required").into();
        assert_eq!(err, ApiError::Validation("Factor category is required".into()));
        assert_eq!(err.to_string(), "Factor category is required");
    }

    #[test]
    fn test_unauthorized() {
        assert!(classify(&with_status(401, "")).is_unauthorized());
        assert!(!classify(&with_status(403, "")).is_unauthorized());
    }
}
