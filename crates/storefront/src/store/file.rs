//! File-backed key-value store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;

/// Key-value store persisted as a JSON snapshot on disk.
///
/// The snapshot is loaded once on open and written through on every mutation.
/// The in-memory map is authoritative: I/O failures are logged and the store
/// keeps serving, matching the contract that storage never produces a fatal
/// error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at the given path, loading any existing snapshot.
    ///
    /// A missing file starts empty; an unreadable or corrupt snapshot is
    /// logged and also starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = load_snapshot(&path);
        Self {
            path,
            map: Mutex::new(map),
        }
    }

    fn persist(&self, map: &HashMap<String, String>) {
        let json = match serde_json::to_string(map) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to serialize store snapshot: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), "failed to write store snapshot: {e}");
        }
    }
}

fn load_snapshot(path: &Path) -> HashMap<String, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read store snapshot: {e}");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(path = %path.display(), "corrupt store snapshot, starting empty: {e}");
            HashMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_owned(), value.to_owned());
        self.persist(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        if map.remove(key).is_some() {
            self.persist(&map);
        }
    }
}
