use std::sync::Arc;

use anyhow::Result;
use sp_core::ids::SnapshotId;
use sp_core::ports::ClockPort;
use sp_core::storage_keys;
use sp_core::ClipboardSnapshot;
use tracing::info;

use super::clipboard::ClipboardStore;
use crate::storage::TypedStore;

/// Named backups of the clipboard collection, newest first.
pub struct SnapshotManager {
    store: TypedStore,
    clipboard: Arc<ClipboardStore>,
    clock: Arc<dyn ClockPort>,
}

impl SnapshotManager {
    pub fn new(store: TypedStore, clipboard: Arc<ClipboardStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            store,
            clipboard,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<ClipboardSnapshot>> {
        self.store.load_list(storage_keys::CLIPBOARD_SNAPSHOTS).await
    }

    /// Capture the current items and folders.
    pub async fn create(&self, name: &str, description: Option<String>) -> Result<ClipboardSnapshot> {
        let snapshot = ClipboardSnapshot {
            id: SnapshotId::new(),
            name: name.to_string(),
            description,
            items: self.clipboard.list_items().await?,
            folders: self.clipboard.list_folder_records().await?,
            created_at: self.clock.now_ms(),
        };

        let mut snapshots = self.list().await?;
        snapshots.insert(0, snapshot.clone());
        self.save(&snapshots).await?;
        info!(
            snapshot_id = %snapshot.id,
            items = snapshot.items.len(),
            folders = snapshot.folders.len(),
            "clipboard snapshot created"
        );
        Ok(snapshot)
    }

    /// Overwrite the live items and folders with the snapshot's contents.
    pub async fn restore(&self, id: &SnapshotId) -> Result<bool> {
        let Some(snapshot) = self.list().await?.into_iter().find(|s| &s.id == id) else {
            return Ok(false);
        };
        self.clipboard.save_items(&snapshot.items).await?;
        self.clipboard.save_folder_records(&snapshot.folders).await?;
        info!(snapshot_id = %id, "clipboard snapshot restored");
        Ok(true)
    }

    pub async fn delete(&self, id: &SnapshotId) -> Result<bool> {
        let mut snapshots = self.list().await?;
        let before = snapshots.len();
        snapshots.retain(|s| &s.id != id);
        if snapshots.len() == before {
            return Ok(false);
        }
        self.save(&snapshots).await?;
        Ok(true)
    }

    async fn save(&self, snapshots: &[ClipboardSnapshot]) -> Result<()> {
        self.store.save(storage_keys::CLIPBOARD_SNAPSHOTS, snapshots).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_store, FixedClock};

    fn managers() -> (SnapshotManager, Arc<ClipboardStore>, Arc<FixedClock>) {
        let store = memory_store();
        let clock = FixedClock::new(100);
        let clipboard = Arc::new(ClipboardStore::new(store.clone(), clock.clone(), 1000));
        (
            SnapshotManager::new(store, clipboard.clone(), clock.clone()),
            clipboard,
            clock,
        )
    }

    #[tokio::test]
    async fn restore_overwrites_live_collection() {
        let (snapshots, clipboard, _) = managers();
        clipboard.capture_text("keep me").await.unwrap();
        clipboard.create_folder("Saved", None).await.unwrap();
        let snapshot = snapshots.create("before cleanup", None).await.unwrap();

        clipboard.capture_text("added later").await.unwrap();
        let folder = clipboard.list_folders().await.unwrap().remove(0);
        clipboard.delete_folder(&folder.id).await.unwrap();

        assert!(snapshots.restore(&snapshot.id).await.unwrap());

        let items = clipboard.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "keep me");
        assert_eq!(clipboard.list_folders().await.unwrap()[0].name, "Saved");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_delete_removes() {
        let (snapshots, _, clock) = managers();
        let first = snapshots.create("one", None).await.unwrap();
        clock.advance(1);
        let second = snapshots.create("two", Some("desc".into())).await.unwrap();

        let ids: Vec<_> = snapshots.list().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        assert!(snapshots.delete(&first.id).await.unwrap());
        assert!(!snapshots.restore(&first.id).await.unwrap());
        assert_eq!(snapshots.list().await.unwrap().len(), 1);
    }
}
