//! Machine-local key-value store in a JSON file.
//!
//! The whole map is kept in memory and rewritten on every `set_item` using a
//! write-to-temp + rename, so the file is never left half written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::repositories::LocalKeyValueStore;
use crate::error::RegistrarError;

/// JSON-file backed [`LocalKeyValueStore`].
///
/// Reads are served from memory, but `set_item` does blocking `std::fs`
/// I/O on the calling thread. Async callers run it inline; the file holds a
/// single small map, so the write is brief. Callers storing larger values
/// should move it to `tokio::task::spawn_blocking`.
pub struct FileKeyValueStore {
    file_path: PathBuf,
    data: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Opens the store, creating parent directories as needed.
    ///
    /// A missing file starts an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Persistence`] if the parent directory cannot be
    /// created or an existing file cannot be read or parsed.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, RegistrarError> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "Opening local key-value store");

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                RegistrarError::persistence(format!(
                    "Failed to create {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let data = if file_path.exists() {
            Self::read_file(&file_path)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, String>, RegistrarError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegistrarError::persistence(format!("Failed to read {}: {e}", path.display()))
        })?;

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            RegistrarError::persistence(format!("Invalid local store {}: {e}", path.display()))
        })
    }

    fn write_file(&self, data: &BTreeMap<String, String>) -> Result<(), RegistrarError> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| RegistrarError::persistence(format!("Failed to serialize: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .and_then(|()| std::fs::rename(&tmp_path, &self.file_path))
            .map_err(|e| {
                RegistrarError::persistence(format!(
                    "Failed to write {}: {e}",
                    self.file_path.display()
                ))
            })
    }
}

impl LocalKeyValueStore for FileKeyValueStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), RegistrarError> {
        let mut data = self
            .data
            .lock()
            .map_err(|_| RegistrarError::persistence("Local store lock poisoned"))?;

        let mut next = data.clone();
        next.insert(key.to_string(), value.to_string());
        self.write_file(&next)?;
        *data = next;

        tracing::debug!(key, "Local store SET");
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, RegistrarError> {
        let data = self
            .data
            .lock()
            .map_err(|_| RegistrarError::persistence("Local store lock poisoned"))?;

        Ok(data.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("nested/store.json")).unwrap();

        assert_eq!(store.get_item("selectedFolderPath").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let store = FileKeyValueStore::open(&path).unwrap();
        store.set_item("selectedFolderPath", "/home/alice/sites").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("selectedFolderPath").unwrap().as_deref(),
            Some("/home/alice/sites")
        );
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_overwrite_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("store.json")).unwrap();

        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "3").unwrap();

        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let result = FileKeyValueStore::open(&path);

        assert!(matches!(result, Err(RegistrarError::Persistence { .. })));
    }
}
