//! Credential persistence.
//!
//! The session manager persists exactly two keys, written and cleared as a
//! pair. The file-backed store keeps them in `<home>/session.json` with
//! restricted permissions (0600). Store operations never fail outward; IO
//! problems are logged and read back as "key absent".

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::paths;

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Storage key for the serialized identity snapshot.
pub const USER_DATA_KEY: &str = "user_data";

/// A durable string key-value store for session credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-backed store holding a flat JSON map.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location under the botdeck home.
    pub fn at_default() -> Self {
        Self::new(paths::session_path())
    }

    fn load_map(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!("Ignoring unparsable session file {}: {err}", self.path.display());
                BTreeMap::new()
            }
        }
    }

    fn save_map(&self, map: &BTreeMap<String, String>) {
        if let Err(err) = self.try_save(map) {
            tracing::warn!("Failed to write session file {}: {err:#}", self.path.display());
        }
    }

    fn try_save(&self, map: &BTreeMap<String, String>) -> anyhow::Result<()> {
        use anyhow::Context;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(map).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.load_map();
        if map.remove(key).is_some() || self.path.exists() {
            self.save_map(&map);
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().expect("store lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.inner.lock().expect("store lock poisoned").remove(key);
    }
}
