//! Session store adapters and the factory selecting one from configuration

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use ecotrack_core::{SessionManager, SessionStore};
use ecotrack_domain::{SessionBackend, SessionConfig};

pub use self::file::FileSessionStore;
pub use self::keychain::KeyringSessionStore;
pub use self::memory::MemorySessionStore;

/// Session file used when the `file` backend has no explicit path
pub const DEFAULT_SESSION_FILE: &str = ".ecotrack-session.json";

/// Store selected by `config.backend`
pub fn build_session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    match config.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::File => Arc::new(FileSessionStore::new(
            config.file_path.clone().unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string()),
        )),
        SessionBackend::Keyring => Arc::new(KeyringSessionStore::new(&config.keyring_service)),
    }
}

/// Session manager over the configured store and token key
pub fn build_session_manager(config: &SessionConfig) -> SessionManager {
    SessionManager::new(build_session_store(config)).with_token_key(&config.token_key)
}
