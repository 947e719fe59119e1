use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};

/// Total serialized size cap, mirroring the ~5 MB bound of browser local
/// storage that this store stands in for.
const MAX_STORE_BYTES: usize = 5 * 1024 * 1024;

/// File name within the cache directory.
const STORE_FILE: &str = "store.json";

/// Key-value store persisted as a single JSON file.
///
/// Every mutation rewrites the whole file; entries are small (serialized
/// API responses) and the total size is capped, so this stays cheap. A
/// corrupt file on open is logged and replaced with an empty store rather
/// than failing.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(STORE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => {
                    debug!(path = %path.display(), entries = map.len(), "Loaded store");
                    map
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt store file, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string(entries)
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let previous = entries.insert(key.to_string(), value.to_string());

        let used: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
        if used > MAX_STORE_BYTES {
            // Roll back so the in-memory view matches what is on disk
            match previous {
                Some(old) => {
                    entries.insert(key.to_string(), old);
                }
                None => {
                    entries.remove(key);
                }
            }
            return Err(StoreError::QuotaExceeded);
        }

        self.persist(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            if let Err(e) = self.persist(&entries) {
                warn!(key, error = %e, "Failed to persist store after remove");
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path().to_path_buf()).unwrap();
            store.set("statline:k", "v").unwrap();
        }
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("statline:k"), Some("v".to_string()));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "not json{{").unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path().to_path_buf()).unwrap();
            store.set("a", "1").unwrap();
            store.remove("a");
        }
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("a"), None);
    }
}
