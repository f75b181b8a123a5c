//! Session store backed by the platform keychain
//!
//! macOS Keychain Access, Windows Credential Manager or the Linux Secret
//! Service, through the `keyring` crate. Each session key becomes one
//! keychain entry under the configured service name.

use ecotrack_core::SessionStore;
use ecotrack_domain::{EcoTrackError, Result};
use keyring::Entry;
use tracing::debug;

use crate::errors::InfraError;

/// Keychain-backed session store
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    service_name: String,
}

impl KeyringSessionStore {
    /// Create a store for a specific service (e.g. "ecotrack")
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(|err| EcoTrackError::from(InfraError::from(err)))
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(service = %self.service_name, key = %key, "reading session value from keychain");

        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "storing session value in keychain");

        self.entry(key)?.set_password(value).map_err(|err| InfraError::from(err).into())
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "deleting session value from keychain");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_service_name() {
        let store = KeyringSessionStore::new("ecotrack.test");
        assert_eq!(store.service_name(), "ecotrack.test");
    }
}
