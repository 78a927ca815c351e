//! String-keyed persistence backends for the progress record.
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use super::errors::ProgressError;

/// Minimal key/value persistence used by the progress store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), ProgressError>;
    fn remove(&mut self, key: &str) -> Result<(), ProgressError>;
}

/// Stores every key in one JSON object on disk, rewritten on each change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => BTreeMap::new(),
            Ok(data) => serde_json::from_str(&data).map_err(|err| {
                ProgressError::corrupt(path.display().to_string(), err.to_string())
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(ProgressError::io(&path, err)),
        };
        Ok(Self { path, entries })
    }

    /// Empty store that will write to `path` on the first change.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| ProgressError::io(parent, err))?;
            }
        }
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data).map_err(|err| ProgressError::io(&self.path, err))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), ProgressError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), ProgressError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ProgressError> {
        Ok(self.with_entries(|entries| entries.get(key).cloned()))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), ProgressError> {
        self.with_entries(|entries| entries.insert(key.to_string(), value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ProgressError> {
        self.with_entries(|entries| entries.remove(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_persists_between_opens() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::open(&path).expect("missing file opens empty");
        assert_eq!(store.get("PetTownSaveData").unwrap(), None);
        store
            .set("PetTownSaveData", "{\"a\":1}".to_string())
            .expect("write succeeds");

        let reopened = JsonFileStore::open(&path).expect("file reopens");
        assert_eq!(
            reopened.get("PetTownSaveData").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn file_store_remove_drops_key_on_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut store = JsonFileStore::empty(&path);
        store.set("keep", "1".into()).unwrap();
        store.set("drop", "2".into()).unwrap();
        store.remove("drop").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("keep").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("drop").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).expect_err("garbage must not parse");
        assert!(matches!(err, ProgressError::Corrupt { .. }));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let mut first = MemoryStore::new();
        let second = first.clone();
        first.set("k", "v".into()).unwrap();
        assert_eq!(second.get("k").unwrap().as_deref(), Some("v"));
    }
}
