//! What the HTTP layer hands back: a successful response or a raw failure.

use std::fmt;

/// 2xx response with its body already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Non-2xx response attached to a [`TransportFailure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResponse {
    pub status: u16,
    pub status_text: Option<String>,
    pub body: String,
}

/// Unclassified failure of one HTTP exchange
///
/// Carries just enough to classify it later: whether the request timed out,
/// whether it was dispatched at all, and the response if one arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub message: String,
    pub timed_out: bool,
    pub request_sent: bool,
    pub response: Option<FailedResponse>,
}

impl TransportFailure {
    /// Failure for a response whose status is not 2xx
    pub fn from_response(response: FailedResponse) -> Self {
        Self {
            message: format!("Request failed with status code {}", response.status),
            timed_out: false,
            request_sent: true,
            response: Some(response),
        }
    }

    /// Failure that happened before anything was put on the wire
    pub fn not_sent(message: impl Into<String>) -> Self {
        Self { message: message.into(), timed_out: false, request_sent: false, response: None }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportFailure {}
