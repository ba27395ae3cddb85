use anyhow::Result;
use async_trait::async_trait;

use crate::bookmark::{BookmarkNode, NewBookmark};

#[async_trait]
pub trait BookmarksPort: Send + Sync {
    /// Full bookmark tree, starting at the root node(s).
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>>;

    async fn create(&self, bookmark: NewBookmark) -> Result<BookmarkNode>;
}
