//! Session store persisted as a JSON object on disk

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ecotrack_core::SessionStore;
use ecotrack_domain::{EcoTrackError, Result};
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::InfraError;

/// Session values in a small JSON file (`{"token": "...", "userId": "7"}`)
///
/// Every operation re-reads the file so separate processes sharing it see
/// each other's logins and logouts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|err| InfraError::from(err).into())
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }

        let json = serde_json::to_string_pretty(map).map_err(InfraError::from)?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, json).map_err(InfraError::from)?;
        restrict_permissions(&staging)?;
        fs::rename(&staging, &self.path).map_err(InfraError::from)?;

        debug!(path = %self.path.display(), entries = map.len(), "session file written");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|err| EcoTrackError::from(InfraError::from(err)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}
