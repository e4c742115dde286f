//! Flat-file JSON store
//!
//! Every entity type lives in its own file under the data directory:
//! either a JSON array (properties, inquiries, ...) or a single JSON
//! object (home page, settings, ...).
//!
//! Reads parse the whole file, writes replace it atomically (temp file +
//! rename). Read-modify-write cycles on the same file are serialized by
//! a per-file async mutex so concurrent requests cannot drop each
//! other's updates.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{Error, Result};

type FileLock = Arc<tokio::sync::Mutex<()>>;

/// Handle to the `data/` directory
pub struct JsonStore {
    root: PathBuf,
    locks: Mutex<HashMap<&'static str, FileLock>>,
}

impl JsonStore {
    /// Open (and create if needed) a data directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
            info!(path = %root.display(), "created data directory");
        }
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a data file
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn lock_for(&self, name: &'static str) -> FileLock {
        self.locks.lock().entry(name).or_default().clone()
    }

    // =========================================================================
    // RAW IO (caller holds the file lock)
    // =========================================================================

    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path(name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A truncated-to-empty file counts as absent
        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::CorruptData {
                path,
                message: e.to_string(),
            })
    }

    async fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name);
        let tmp = self.path(&format!("{}.tmp", name));

        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(file = name, "wrote data file");
        Ok(())
    }

    // =========================================================================
    // PUBLIC API
    // =========================================================================

    /// Read a document, writing `default` to disk first if the file is absent
    pub async fn load_or_init<T, D>(&self, name: &'static str, default: D) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
    {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        if let Some(value) = self.read(name).await? {
            return Ok(value);
        }

        let value = default();
        self.write(name, &value).await?;
        info!(file = name, "initialized with defaults");
        Ok(value)
    }

    /// Read a list file; an absent file is an empty list
    pub async fn load_list<T: DeserializeOwned>(&self, name: &'static str) -> Result<Vec<T>> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;
        Ok(self.read(name).await?.unwrap_or_default())
    }

    /// Replace a file's contents
    pub async fn save<T: Serialize>(&self, name: &'static str, value: &T) -> Result<()> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;
        self.write(name, value).await
    }

    /// Read-modify-write a document under the file lock.
    ///
    /// If `f` returns an error nothing is written.
    pub async fn update<T, D, F, R>(&self, name: &'static str, default: D, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let mut value = match self.read(name).await? {
            Some(value) => value,
            None => default(),
        };
        let out = f(&mut value)?;
        self.write(name, &value).await?;
        Ok(out)
    }

    /// [`JsonStore::update`] for list files
    pub async fn update_list<T, F, R>(&self, name: &'static str, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        self.update(name, Vec::new, f).await
    }

    /// Whether a data file exists yet
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        title: String,
    }

    fn doc(title: &str) -> Doc {
        Doc {
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_or_init_writes_defaults_once() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.path()).unwrap();

        let first: Doc = store.load_or_init("doc.json", || doc("first")).await.unwrap();
        assert_eq!(first, doc("first"));
        assert!(store.exists("doc.json"));

        // Default is not consulted once the file exists
        let second: Doc = store.load_or_init("doc.json", || doc("second")).await.unwrap();
        assert_eq!(second, doc("first"));
    }

    #[tokio::test]
    async fn test_missing_list_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.path()).unwrap();

        let items: Vec<Doc> = store.load_list("items.json").await.unwrap();
        assert!(items.is_empty());
        assert!(!store.exists("items.json"));
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("data");
        let store = JsonStore::open(&nested).unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("items.json"), "[{\"title\": ").unwrap();
        let store = JsonStore::open(temp.path()).unwrap();

        let result: Result<Vec<Doc>> = store.load_list("items.json").await;
        assert!(matches!(result, Err(Error::CorruptData { .. })));
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::open(temp.path()).unwrap();
        store.save("items.json", &vec![doc("keep")]).await.unwrap();

        let result: Result<()> = store
            .update_list("items.json", |items: &mut Vec<Doc>| {
                items.clear();
                Err(Error::validation("nope"))
            })
            .await;
        assert!(result.is_err());

        let items: Vec<Doc> = store.load_list("items.json").await.unwrap();
        assert_eq!(items, vec![doc("keep")]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(JsonStore::open(temp.path()).unwrap());

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update_list("items.json", |items: &mut Vec<Doc>| {
                        items.push(doc(&format!("item-{}", i)));
                        Ok(())
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let items: Vec<Doc> = store.load_list("items.json").await.unwrap();
        assert_eq!(items.len(), 32);
        assert!(!store.exists("items.json.tmp"));
    }
}
