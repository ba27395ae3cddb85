use std::sync::Arc;

use anyhow::{Context, Result};
use sp_core::bookmark::{default_folder_parent, BookmarkNode, NewBookmark};
use sp_core::ports::BookmarksPort;
use sp_core::protocol::RuntimeMessage;
use sp_core::storage_keys;
use tracing::{info, warn};

use super::content_scripts::ContentScriptManager;
use crate::storage::TypedStore;

/// Mirror of the host bookmark tree under `bookmarkTree`.
pub struct BookmarkSync {
    bookmarks: Arc<dyn BookmarksPort>,
    store: TypedStore,
    scripts: Arc<ContentScriptManager>,
}

impl BookmarkSync {
    pub fn new(
        bookmarks: Arc<dyn BookmarksPort>,
        store: TypedStore,
        scripts: Arc<ContentScriptManager>,
    ) -> Self {
        Self {
            bookmarks,
            store,
            scripts,
        }
    }

    /// Overwrite the cached tree and tell every open tab about it.
    pub async fn resync(&self) -> Result<()> {
        let tree = self
            .bookmarks
            .get_tree()
            .await
            .context("read bookmark tree failed")?;
        self.store.save(storage_keys::BOOKMARK_TREE, &tree).await?;

        match self.scripts.broadcast(&RuntimeMessage::BookmarksUpdated).await {
            Ok(delivered) => info!(delivered, "bookmark tree synced"),
            Err(e) => warn!(error = %e, "bookmark tree synced, tab broadcast failed"),
        }
        Ok(())
    }

    pub async fn cached_tree(&self) -> Result<Vec<BookmarkNode>> {
        self.store.load_list(storage_keys::BOOKMARK_TREE).await
    }

    /// Create a bookmark folder, defaulting its parent to "Other Bookmarks".
    pub async fn create_folder(&self, mut folder: NewBookmark) -> Result<BookmarkNode> {
        if folder.parent_id.as_deref().map_or(true, str::is_empty) {
            let tree = self
                .bookmarks
                .get_tree()
                .await
                .context("read bookmark tree failed")?;
            folder.parent_id = default_folder_parent(&tree);
        }

        let node = self
            .bookmarks
            .create(folder)
            .await
            .context("create bookmark folder failed")?;

        if let Err(e) = self.resync().await {
            warn!(error = %format!("{e:#}"), "resync after folder creation failed");
        }
        Ok(node)
    }
}
