//! Authentication records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_TOKEN_PREFIX;

/// Body of `POST /v1/auth/signup`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub org_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("org_name", &self.org_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /v1/auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token issued by signup and login. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Non-empty access token, if the backend issued one
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.trim().is_empty())
    }

    /// Token to keep for the session
    ///
    /// Falls back to a local `user_authenticated_<id>` marker when the backend
    /// answered with a user id but no access token.
    pub fn session_token(&self) -> Option<String> {
        match (self.token(), self.user_id) {
            (Some(token), _) => Some(token.to_string()),
            (None, Some(id)) => Some(format!("{PLACEHOLDER_TOKEN_PREFIX}{id}")),
            (None, None) => None,
        }
    }
}

/// Organization the current user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInfo {
    pub id: i64,
    pub name: String,
    pub plan: String,
}

/// Response of `GET /v1/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub org: OrgInfo,
}
