use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use sp_core::clipboard::folder::{find_folder, find_folder_mut, insert_folder, remove_folder};
use sp_core::clipboard::item::push_capped;
use sp_core::clipboard::{
    build_tree, flatten_tree, ClipboardItemPatch, ItemFilter, NewClipboardItem,
};
use sp_core::ids::{ClipboardItemId, FolderId};
use sp_core::ports::ClockPort;
use sp_core::storage_keys;
use sp_core::{ClipboardFolder, ClipboardItem, FolderRecord};
use tracing::{debug, info};

use crate::storage::TypedStore;

/// Clipboard items (newest first, capped) and their folder tree.
pub struct ClipboardStore {
    store: TypedStore,
    clock: Arc<dyn ClockPort>,
    max_items: usize,
}

impl ClipboardStore {
    pub fn new(store: TypedStore, clock: Arc<dyn ClockPort>, max_items: usize) -> Self {
        Self {
            store,
            clock,
            max_items,
        }
    }

    // ---- items ----

    pub async fn list_items(&self) -> Result<Vec<ClipboardItem>> {
        self.store.load_list(storage_keys::CLIPBOARD_ITEMS).await
    }

    pub async fn get_item(&self, id: &ClipboardItemId) -> Result<Option<ClipboardItem>> {
        Ok(self.list_items().await?.into_iter().find(|i| &i.id == id))
    }

    /// First item flagged as favorite, in stored order.
    pub async fn first_favorite(&self) -> Result<Option<ClipboardItem>> {
        Ok(self.list_items().await?.into_iter().find(|i| i.is_favorite))
    }

    /// Insert at the front, evicting the oldest entries past the cap.
    pub async fn add_item(&self, fields: NewClipboardItem) -> Result<ClipboardItem> {
        let mut items = self.list_items().await?;
        let item = ClipboardItem::create(ClipboardItemId::new(), fields, self.clock.now_ms());
        push_capped(&mut items, item.clone(), self.max_items);
        self.save_items(&items).await?;
        debug!(item_id = %item.id, content_type = ?item.content_type, "clipboard item added");
        Ok(item)
    }

    /// Store captured text. Blank text is ignored.
    pub async fn capture_text(&self, text: &str) -> Result<Option<ClipboardItem>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.add_item(NewClipboardItem::from_text(text)).await.map(Some)
    }

    pub async fn update_item(
        &self,
        id: &ClipboardItemId,
        patch: ClipboardItemPatch,
    ) -> Result<Option<ClipboardItem>> {
        let mut items = self.list_items().await?;
        let Some(item) = items.iter_mut().find(|i| &i.id == id) else {
            return Ok(None);
        };
        item.apply(patch);
        let updated = item.clone();
        self.save_items(&items).await?;
        Ok(Some(updated))
    }

    pub async fn set_favorite(&self, id: &ClipboardItemId, favorite: bool) -> Result<bool> {
        let patch = ClipboardItemPatch {
            is_favorite: Some(favorite),
            ..Default::default()
        };
        Ok(self.update_item(id, patch).await?.is_some())
    }

    /// File the item under `folder`, or unfile it with `None`.
    pub async fn move_item(&self, id: &ClipboardItemId, folder: Option<FolderId>) -> Result<bool> {
        let patch = ClipboardItemPatch {
            folder_id: Some(folder),
            ..Default::default()
        };
        Ok(self.update_item(id, patch).await?.is_some())
    }

    pub async fn delete_item(&self, id: &ClipboardItemId) -> Result<bool> {
        let mut items = self.list_items().await?;
        let before = items.len();
        items.retain(|i| &i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save_items(&items).await?;
        Ok(true)
    }

    pub async fn filter_items(&self, filter: &ItemFilter) -> Result<Vec<ClipboardItem>> {
        Ok(self
            .list_items()
            .await?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    // ---- folders ----

    /// Folder tree with each folder's `items` filled from the item collection.
    pub async fn list_folders(&self) -> Result<Vec<ClipboardFolder>> {
        let mut tree = self.load_tree().await?;
        let mut by_folder: HashMap<FolderId, Vec<ClipboardItem>> = HashMap::new();
        for item in self.list_items().await? {
            if let Some(folder_id) = item.folder_id.clone() {
                by_folder.entry(folder_id).or_default().push(item);
            }
        }
        attach_items(&mut tree, &mut by_folder);
        Ok(tree)
    }

    pub async fn list_folder_records(&self) -> Result<Vec<FolderRecord>> {
        self.store.load_list(storage_keys::CLIPBOARD_FOLDERS).await
    }

    /// Create a folder. An unknown `parent` places it at the root.
    pub async fn create_folder(
        &self,
        name: &str,
        parent: Option<FolderId>,
    ) -> Result<ClipboardFolder> {
        let mut tree = self.load_tree().await?;
        let folder = ClipboardFolder::new(FolderId::new(), name, None, self.clock.now_ms());
        let id = folder.id.clone();
        if !insert_folder(&mut tree, folder, parent.as_ref()) {
            debug!(parent = ?parent, "folder parent not found, creating at root");
        }
        self.save_tree(&tree).await?;

        let created = find_folder(&tree, &id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("created folder {id} missing from tree"))?;
        Ok(created)
    }

    /// Flip the `expanded` flag; returns the new value.
    pub async fn toggle_folder(&self, id: &FolderId) -> Result<Option<bool>> {
        let mut tree = self.load_tree().await?;
        let Some(folder) = find_folder_mut(&mut tree, id) else {
            return Ok(None);
        };
        folder.expanded = !folder.expanded;
        let expanded = folder.expanded;
        self.save_tree(&tree).await?;
        Ok(Some(expanded))
    }

    pub async fn rename_folder(&self, id: &FolderId, name: &str) -> Result<bool> {
        let mut tree = self.load_tree().await?;
        let Some(folder) = find_folder_mut(&mut tree, id) else {
            return Ok(false);
        };
        folder.name = name.to_string();
        self.save_tree(&tree).await?;
        Ok(true)
    }

    /// Remove the folder, its descendants, and every item filed in them.
    pub async fn delete_folder(&self, id: &FolderId) -> Result<bool> {
        let mut tree = self.load_tree().await?;
        let Some(removed) = remove_folder(&mut tree, id) else {
            return Ok(false);
        };
        let removed_ids = removed.subtree_ids();

        let mut items = self.list_items().await?;
        let before = items.len();
        items.retain(|item| {
            item.folder_id
                .as_ref()
                .map_or(true, |folder| !removed_ids.contains(folder))
        });

        self.save_tree(&tree).await?;
        if items.len() != before {
            self.save_items(&items).await?;
        }
        info!(
            folder_id = %id,
            folders = removed_ids.len(),
            items = before - items.len(),
            "folder deleted"
        );
        Ok(true)
    }

    // ---- raw collections, used by snapshots ----

    pub(crate) async fn save_items(&self, items: &[ClipboardItem]) -> Result<()> {
        self.store.save(storage_keys::CLIPBOARD_ITEMS, items).await
    }

    pub(crate) async fn save_folder_records(&self, records: &[FolderRecord]) -> Result<()> {
        self.store.save(storage_keys::CLIPBOARD_FOLDERS, records).await
    }

    async fn load_tree(&self) -> Result<Vec<ClipboardFolder>> {
        Ok(build_tree(&self.list_folder_records().await?))
    }

    async fn save_tree(&self, tree: &[ClipboardFolder]) -> Result<()> {
        self.save_folder_records(&flatten_tree(tree)).await
    }
}

fn attach_items(tree: &mut [ClipboardFolder], by_folder: &mut HashMap<FolderId, Vec<ClipboardItem>>) {
    for folder in tree {
        folder.items = by_folder.remove(&folder.id).unwrap_or_default();
        attach_items(&mut folder.children, by_folder);
    }
}
