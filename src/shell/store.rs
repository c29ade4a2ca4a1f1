use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

use crate::foundation::error::{CardError, CardResult};

/// Key-value persistence for shell state.
///
/// The compositor never touches a store; the CLI and other front ends inject one.
pub trait SettingsStore {
    /// Value stored under `key`, if any.
    fn load(&self, key: &str) -> CardResult<Option<serde_json::Value>>;
    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: serde_json::Value) -> CardResult<()>;
    /// Remove `key`. Returns whether it was present.
    fn remove(&mut self, key: &str) -> CardResult<bool>;
    /// All stored keys in sorted order.
    fn keys(&self) -> CardResult<Vec<String>>;
}

/// Typed read of `key`.
pub fn load_json<T: DeserializeOwned>(
    store: &(impl SettingsStore + ?Sized),
    key: &str,
) -> CardResult<Option<T>> {
    match store.load(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Typed write of `key`.
pub fn save_json<T: Serialize>(
    store: &mut (impl SettingsStore + ?Sized),
    key: &str,
    value: &T,
) -> CardResult<()> {
    store.save(key, serde_json::to_value(value)?)
}

/// In-process store, mostly for tests and one-shot runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, serde_json::Value>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> CardResult<Option<serde_json::Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: serde_json::Value) -> CardResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CardResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> CardResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a sibling temp file and a rename, so readers
/// see either the old or the new contents. A missing file reads as an empty store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CardResult<BTreeMap<String, serde_json::Value>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read settings file '{}'", self.path.display()))
                    .into());
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            CardError::serde(format!(
                "settings file '{}' is not a JSON object: {e}",
                self.path.display()
            ))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, serde_json::Value>) -> CardResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings dir '{}'", parent.display()))?;
        }

        let bytes = serde_json::to_vec_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, &bytes)
            .with_context(|| format!("write settings temp file '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace settings file '{}'", self.path.display()))?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, key: &str) -> CardResult<Option<serde_json::Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: serde_json::Value) -> CardResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        tracing::debug!(key, path = %self.path.display(), "saving setting");
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> CardResult<bool> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.write_all(&entries)?;
        Ok(true)
    }

    fn keys(&self) -> CardResult<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/store.rs"]
mod tests;
