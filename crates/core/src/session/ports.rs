//! Port interface for durable session storage
//!
//! The access layer only needs "get/set/remove a string by key"; adapters in
//! infra decide where the value lives (memory, a JSON file, the platform
//! keychain).

use ecotrack_domain::Result;

/// Durable key/value storage for session values
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` (idempotent)
    fn remove(&self, key: &str) -> Result<()>;
}
