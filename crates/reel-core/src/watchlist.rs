use reel_models::WatchlistEntry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Durable key holding the serialized watchlist.
pub const WATCHLIST_KEY: &str = "reel-search-watchlist";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("watchlist storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("watchlist could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("watchlist storage is unavailable")]
    Unavailable,

    #[error("{0} is not on screen")]
    UnknownRecord(String),
}

/// Key/value persistence underneath the watchlist.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("Watchlist file {:?} does not exist", path);
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values: Mutex::new(values),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Ordered, id-unique list of saved titles.
///
/// Every mutation writes the whole list back before returning. A failed
/// write leaves the in-memory list as it was.
pub struct WatchlistStore<B: StorageBackend> {
    backend: B,
    entries: Vec<WatchlistEntry>,
}

impl<B: StorageBackend> WatchlistStore<B> {
    /// Load the list. Missing or unreadable storage starts empty.
    pub fn open(backend: B) -> Self {
        let entries = match backend.read(WATCHLIST_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WatchlistEntry>>(&raw) {
                Ok(entries) => dedupe(entries),
                Err(e) => {
                    warn!("Watchlist storage is corrupt ({}); starting with an empty watchlist", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read watchlist storage ({}); starting with an empty watchlist", e);
                Vec::new()
            }
        };
        info!(operation = "watchlist_load", entries = entries.len(), "Watchlist loaded");
        Self { backend, entries }
    }

    /// Returns `true` if the entry was added, `false` if its id was already saved.
    pub fn add(&mut self, entry: WatchlistEntry) -> Result<bool, StoreError> {
        if self.contains(&entry.id) {
            return Ok(false);
        }
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;
        Ok(true)
    }

    /// Returns `true` if something was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let next: Vec<WatchlistEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in insertion order.
    pub fn list(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `""`, `"1 title"` or `"{n} titles"`.
    pub fn count_label(&self) -> String {
        count_label(self.len())
    }

    fn commit(&mut self, next: Vec<WatchlistEntry>) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(&next)?;
        self.backend.write(WATCHLIST_KEY, &serialized)?;
        self.entries = next;
        debug!(operation = "watchlist_save", entries = self.entries.len(), "Watchlist saved");
        Ok(())
    }
}

pub fn count_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 title".to_string(),
        n => format!("{} titles", n),
    }
}

// Hand-edited storage may repeat ids; the first occurrence wins.
fn dedupe(entries: Vec<WatchlistEntry>) -> Vec<WatchlistEntry> {
    let mut unique: Vec<WatchlistEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.iter().any(|e| e.id == entry.id) {
            unique.push(entry);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::{Field, MediaType};
    use tempfile::TempDir;

    fn entry(id: &str, title: &str) -> WatchlistEntry {
        WatchlistEntry {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            media_type: MediaType::Movie,
            poster_url: Field::Unavailable,
        }
    }

    /// Backend whose writes always fail.
    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = WatchlistStore::open(MemoryBackend::new());
        assert!(store.add(entry("tt1", "Inception")).unwrap());
        assert!(!store.add(entry("tt1", "Inception")).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.count_label(), "1 title");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = WatchlistStore::open(MemoryBackend::new());
        store.add(entry("tt1", "Inception")).unwrap();
        assert!(!store.remove("tt404").unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.remove("tt1").unwrap());
        assert!(store.is_empty());
        assert_eq!(store.count_label(), "");
    }

    #[test]
    fn test_file_round_trip_preserves_order() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = WatchlistStore::open(FileBackend::new(temp_dir.path()));
            store.add(entry("tt3", "Tenet")).unwrap();
            store.add(entry("tt1", "Inception")).unwrap();
            store.add(entry("tt2", "Memento")).unwrap();
            store.remove("tt1").unwrap();
        }

        let store = WatchlistStore::open(FileBackend::new(temp_dir.path()));
        let ids: Vec<&str> = store.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tt3", "tt2"]);
        assert_eq!(store.count_label(), "2 titles");
        assert!(temp_dir.path().join("reel-search-watchlist.json").exists());
        assert!(!temp_dir.path().join("reel-search-watchlist.tmp").exists());
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let store = WatchlistStore::open(MemoryBackend::with_value(WATCHLIST_KEY, "{not json"));
        assert!(store.is_empty());

        let store = WatchlistStore::open(MemoryBackend::with_value(WATCHLIST_KEY, r#"{"id": "tt1"}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_ids_in_storage_collapse() {
        let raw = serde_json::to_string(&vec![entry("tt1", "A"), entry("tt1", "B"), entry("tt2", "C")]).unwrap();
        let store = WatchlistStore::open(MemoryBackend::with_value(WATCHLIST_KEY, &raw));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("tt1").unwrap().title, "A");
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let mut store = WatchlistStore::open(ReadOnlyBackend);
        assert!(store.add(entry("tt1", "Inception")).is_err());
        assert!(store.is_empty());
    }
}
