//! Persistent preference storage
//!
//! Preferences are typed values stored under string keys. The backing store is
//! a plain key-value collaborator so the shell can be handed a file-backed
//! store in production and an in-memory one in tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::types::ViewKind;

pub const ACTIVE_VIEW_KEY: &str = "activeView";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Raw key-value backend
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// JSON object on disk, rewritten on every set
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl FileStore {
    /// Open the store, starting empty when the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable preferences file");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    fn load(path: &Path) -> Result<HashMap<String, Value>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Typed access on top of a [`KeyValueStore`]
pub struct PreferenceStore {
    backend: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Box::new(backend) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Stored value, or `default` when missing or not parseable as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.get(key) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "Stored preference has unexpected shape, using default");
                default
            }),
            None => default,
        }
    }

    /// Persist `value`; failures are logged, never returned
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_value(value)
            .map_err(anyhow::Error::from)
            .and_then(|value| self.backend.set(key, value));
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to persist preference");
        }
    }

    pub fn active_view(&self) -> ViewKind {
        self.get(ACTIVE_VIEW_KEY, ViewKind::default())
    }

    pub fn dark_mode(&self) -> bool {
        self.get(DARK_MODE_KEY, true)
    }
}
