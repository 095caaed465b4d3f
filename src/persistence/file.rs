//! JSON-file implementation of the fallback waitlist store.
//!
//! The whole collection lives in one file shaped as
//! `{"entries": [ ... ]}`. Every insert is a read-modify-write of the full
//! collection, serialized behind a per-store mutex so concurrent requests
//! within one process cannot overwrite each other's appends. Concurrent
//! writers in *separate* processes can still race; that remains accepted
//! risk for the low-throughput usage this store exists for.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::WaitlistEntry;
use crate::error::ApiError;

/// On-disk collection shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WaitlistFile {
    entries: Vec<WaitlistEntry>,
}

/// File-backed waitlist store at a fixed path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by the given path. The file itself is created
    /// lazily on first insert.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts the entry unless one with the same normalized email already
    /// exists. Returns `true` when the entry was newly appended.
    ///
    /// Invalid or missing file content is treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on filesystem or serialization failure.
    pub async fn insert_if_absent(&self, entry: &WaitlistEntry) -> Result<bool, ApiError> {
        let _guard = self.write_lock.lock().await;

        self.ensure_file().await?;

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ApiError::Storage(format!("read {}: {e}", self.path.display())))?;
        let mut collection: WaitlistFile = serde_json::from_str(&raw).unwrap_or_default();

        if collection.entries.iter().any(|e| e.email == entry.email) {
            return Ok(false);
        }

        collection.entries.push(entry.clone());
        self.write_collection(&collection).await?;
        Ok(true)
    }

    /// Creates the parent directory and an empty collection file if absent.
    async fn ensure_file(&self) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::Storage(format!("create {}: {e}", parent.display())))?;
        }
        match fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => self.write_collection(&WaitlistFile::default()).await,
            Err(e) => Err(ApiError::Storage(format!(
                "stat {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_collection(&self, collection: &WaitlistFile) -> Result<(), ApiError> {
        let json = serde_json::to_string_pretty(collection)
            .map_err(|e| ApiError::Storage(format!("encode waitlist collection: {e}")))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| ApiError::Storage(format!("write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NewSignup;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("data").join("waitlist.json"))
    }

    fn entry(name: &str, email: &str) -> WaitlistEntry {
        let Ok(signup) = NewSignup::parse(name, email) else {
            panic!("expected valid signup");
        };
        WaitlistEntry::new(signup)
    }

    async fn read_file(store: &FileStore) -> WaitlistFile {
        let Ok(raw) = fs::read_to_string(store.path()).await else {
            panic!("backing file missing");
        };
        let Ok(collection) = serde_json::from_str(&raw) else {
            panic!("backing file not valid JSON");
        };
        collection
    }

    #[tokio::test]
    async fn first_insert_creates_file_and_appends() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let store = store_in(&dir);

        let Ok(added) = store.insert_if_absent(&entry("Jane Doe", "jane@example.com")).await
        else {
            panic!("insert failed");
        };
        assert!(added);

        let collection = read_file(&store).await;
        assert_eq!(collection.entries.len(), 1);
        let Some(stored) = collection.entries.first() else {
            panic!("entry missing");
        };
        assert_eq!(stored.email, "jane@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_left_untouched() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let store = store_in(&dir);

        let first = entry("Jane Doe", "jane@example.com");
        let Ok(added) = store.insert_if_absent(&first).await else {
            panic!("insert failed");
        };
        assert!(added);

        // Same normalized email, different name: must not create a second
        // entry and must not overwrite the first.
        let Ok(added) = store.insert_if_absent(&entry("J. Doe", "Jane@Example.COM")).await else {
            panic!("insert failed");
        };
        assert!(!added);

        let collection = read_file(&store).await;
        assert_eq!(collection.entries.len(), 1);
        let Some(stored) = collection.entries.first() else {
            panic!("entry missing");
        };
        assert_eq!(stored.name, "Jane Doe");
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let store = store_in(&dir);
        let Some(parent) = store.path().parent() else {
            panic!("path has no parent");
        };
        let Ok(()) = std::fs::create_dir_all(parent) else {
            panic!("create_dir_all failed");
        };
        let Ok(()) = std::fs::write(store.path(), "not json {") else {
            panic!("write failed");
        };

        let Ok(added) = store.insert_if_absent(&entry("Jane", "jane@example.com")).await else {
            panic!("insert failed");
        };
        assert!(added);

        let collection = read_file(&store).await;
        assert_eq!(collection.entries.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_preserved() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let store = std::sync::Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = std::sync::Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert_if_absent(&entry("Member", &format!("member{i}@example.com")))
                    .await
            }));
        }
        for handle in handles {
            let Ok(Ok(added)) = handle.await else {
                panic!("insert task failed");
            };
            assert!(added);
        }

        let collection = read_file(&store).await;
        assert_eq!(collection.entries.len(), 8);
    }
}
