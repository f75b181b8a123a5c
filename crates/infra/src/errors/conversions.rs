//! Conversions from external infrastructure errors into domain errors.

use ecotrack_domain::EcoTrackError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

use crate::http::TransportFailure;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EcoTrackError);

impl From<InfraError> for EcoTrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EcoTrackError> for InfraError {
    fn from(value: EcoTrackError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEcoTrackError {
    fn into_ecotrack(self) -> EcoTrackError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → EcoTrackError */
/* -------------------------------------------------------------------------- */

impl IntoEcoTrackError for KeyringError {
    fn into_ecotrack(self) -> EcoTrackError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => EcoTrackError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                EcoTrackError::Storage("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => EcoTrackError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            PlatformFailure(err) => {
                EcoTrackError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                EcoTrackError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => EcoTrackError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_ecotrack())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → EcoTrackError */
/* -------------------------------------------------------------------------- */

impl IntoEcoTrackError for std::io::Error {
    fn into_ecotrack(self) -> EcoTrackError {
        match self.kind() {
            std::io::ErrorKind::NotFound => EcoTrackError::NotFound(self.to_string()),
            _ => EcoTrackError::Storage(format!("session file I/O failed: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_ecotrack())
    }
}

impl IntoEcoTrackError for serde_json::Error {
    fn into_ecotrack(self) -> EcoTrackError {
        EcoTrackError::Storage(format!("session file is not valid JSON: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_ecotrack())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportFailure */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for TransportFailure {
    fn from(err: HttpError) -> Self {
        // Builder errors (bad URL, bad header) never reach the network.
        let request_sent = !err.is_builder();
        let message = describe_http_error(&err);

        TransportFailure {
            message,
            timed_out: err.is_timeout(),
            request_sent,
            response: None,
        }
    }
}

fn describe_http_error(err: &HttpError) -> String {
    if err.is_timeout() {
        return "Request timed out".to_string();
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return format!("Connection failed: {err}");
    }

    err.to_string()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
