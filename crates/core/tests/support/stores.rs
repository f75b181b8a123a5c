//! In-memory `SessionStore` mock recording every write.

use std::collections::HashMap;
use std::sync::Mutex;

use ecotrack_core::SessionStore;
use ecotrack_domain::Result as DomainResult;

/// Store that keeps values in a map and logs mutations in order.
#[derive(Default)]
pub struct RecordingStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutations as `set:key` / `remove:key`, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl SessionStore for RecordingStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        self.writes.lock().unwrap().push(format!("set:{key}"));
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.values.lock().unwrap().remove(key);
        self.writes.lock().unwrap().push(format!("remove:{key}"));
        Ok(())
    }
}
