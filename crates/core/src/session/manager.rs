//! Session bookkeeping on top of a [`SessionStore`]

use std::sync::Arc;

use ecotrack_domain::constants::{SESSION_TOKEN_KEY, SESSION_USER_ID_KEY};
use ecotrack_domain::Result;
use tracing::{debug, warn};

use super::ports::SessionStore;

/// Reads and writes the session token and user id in the durable store
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    token_key: String,
}

impl SessionManager {
    /// Create a manager using the default `token` key
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, token_key: SESSION_TOKEN_KEY.to_string() }
    }

    /// Override the key the token is stored under
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Stored token, `None` when absent or blank
    pub fn token(&self) -> Result<Option<String>> {
        let token = self.store.get(&self.token_key)?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    /// Stored user id; an unparseable value is treated as absent
    pub fn user_id(&self) -> Result<Option<i64>> {
        let Some(raw) = self.store.get(SESSION_USER_ID_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                warn!(value = %raw, "ignoring malformed stored user id");
                Ok(None)
            }
        }
    }

    /// Persist a freshly issued session
    pub fn save(&self, token: &str, user_id: Option<i64>) -> Result<()> {
        self.store.set(&self.token_key, token)?;
        match user_id {
            Some(id) => self.store.set(SESSION_USER_ID_KEY, &id.to_string())?,
            None => self.store.remove(SESSION_USER_ID_KEY)?,
        }
        debug!(has_user_id = user_id.is_some(), "session persisted");
        Ok(())
    }

    /// Forget the session entirely
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.token_key)?;
        self.store.remove(SESSION_USER_ID_KEY)?;
        debug!("session cleared");
        Ok(())
    }

    /// Whether a token is currently stored; read errors count as "no"
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("token_key", &self.token_key).finish()
    }
}
