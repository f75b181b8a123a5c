//! Application constants
//!
//! Values fixed by the backend contract or by client defaults.

// Transport
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("ecotrack/", env!("CARGO_PKG_VERSION"));

// Session storage keys
pub const SESSION_TOKEN_KEY: &str = "token";
pub const SESSION_USER_ID_KEY: &str = "userId";
/// Prefix of the local token used when the backend issues a user id only
pub const PLACEHOLDER_TOKEN_PREFIX: &str = "user_authenticated_";

// Ingest limits
pub const MIN_INGEST_EVENTS: usize = 1;
pub const MAX_INGEST_EVENTS: usize = 1000;
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;
pub const UPLOAD_FIELD_NAME: &str = "file";

// Tenant limits
pub const MAX_FACILITY_NAME_CHARS: usize = 200;
pub const MIN_PASSWORD_CHARS: usize = 6;

// Listing
pub const DEFAULT_PAGE_SIZE: usize = 10;
