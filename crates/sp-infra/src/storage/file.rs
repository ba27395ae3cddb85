use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sp_core::ports::{KeyValueStorePort, StorageError};
use tokio::fs;
use tokio::sync::Mutex;

/// Key-value store persisted as a single JSON object on disk.
///
/// The document is loaded on first access and cached; every mutation
/// rewrites the whole file through a temp file + rename.
pub struct FileKeyValueStore {
    path: PathBuf,
    cache: Mutex<Option<Map<String, Value>>>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read store failed: {}", self.path.display()))
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("parse store failed: {}", self.path.display()))
    }

    async fn atomic_write(&self, document: &Map<String, Value>) -> Result<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(document).context("serialize store failed")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }

    /// Run `f` against the cached document, loading it first if needed.
    ///
    /// A failed write drops the cache so the next access reloads from disk.
    async fn with_document<T>(
        &self,
        f: impl FnOnce(&mut Map<String, Value>) -> (T, bool),
    ) -> Result<T, StorageError> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            let document = self.read_document().await.map_err(backend)?;
            *guard = Some(document);
        }
        let Some(document) = guard.as_mut() else {
            return Err(StorageError::Backend("store cache not loaded".to_string()));
        };

        let (out, dirty) = f(document);
        if dirty {
            if let Err(e) = self.atomic_write(document).await {
                // Cache must not hold a value the file does not.
                *guard = None;
                return Err(backend(e));
            }
        }
        Ok(out)
    }
}

fn backend(err: anyhow::Error) -> StorageError {
    StorageError::Backend(format!("{err:#}"))
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.with_document(|doc| (doc.get(key).cloned(), false)).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.with_document(|doc| {
            doc.insert(key.to_string(), value);
            ((), true)
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_document(|doc| {
            let removed = doc.remove(key).is_some();
            ((), removed)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("store.json"));

        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileKeyValueStore::new(&path);
        store.set("clipboard_items", json!([{"id": "a"}])).await.unwrap();
        store.set("bookmarkTree", json!([])).await.unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(
            reopened.get("clipboard_items").await.unwrap(),
            Some(json!([{"id": "a"}]))
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileKeyValueStore::new(&path);
        store.set("k", json!(1)).await.unwrap();

        store.remove("k").await.unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert!(reopened.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_document_is_a_backend_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileKeyValueStore::new(&path).get("k").await.unwrap_err();

        assert!(matches!(err, StorageError::Backend(_)));
    }

    #[tokio::test]
    async fn failed_write_leaves_no_phantom_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let store = FileKeyValueStore::new(&path);
        store.set("k", json!(1)).await.unwrap();

        let tmp_path = path.with_extension("json.tmp");
        std::fs::create_dir(&tmp_path).unwrap();
        let err = store.set("k", json!(2)).await.unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));

        assert_eq!(store.get("k").await.unwrap(), Some(json!(1)));
        std::fs::remove_dir(&tmp_path).unwrap();
        store.set("other", json!(true)).await.unwrap();
        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("k").await.unwrap(), Some(json!(1)));
    }
}
