use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sp_core::bookmark::{BookmarkChangeKind, BookmarkNode, NewBookmark};
use sp_core::ports::BookmarksPort;
use sp_core::HostEvent;
use tracing::warn;

use crate::runtime::HostEventSender;

/// Bookmark tree held in memory. Mutations raise bookmark change events
/// on the host channel when one is attached.
pub struct InMemoryBookmarks {
    tree: Mutex<Vec<BookmarkNode>>,
    next_id: AtomicU64,
    events: Option<HostEventSender>,
}

impl InMemoryBookmarks {
    /// Root `0` holding "Bookmarks bar" (`1`) and "Other bookmarks" (`2`).
    pub fn new(events: Option<HostEventSender>) -> Self {
        let root = BookmarkNode {
            id: "0".to_string(),
            title: String::new(),
            url: None,
            parent_id: None,
            index: None,
            date_added: None,
            children: Some(vec![
                folder_node("1", "Bookmarks bar", "0", 0),
                folder_node("2", "Other bookmarks", "0", 1),
            ]),
        };
        Self {
            tree: Mutex::new(vec![root]),
            next_id: AtomicU64::new(3),
            events,
        }
    }

    fn notify(&self, change: BookmarkChangeKind) {
        let Some(events) = &self.events else {
            return;
        };
        if let Err(e) = events.try_send(HostEvent::BookmarkChanged(change)) {
            warn!(?change, error = %e, "bookmark change event not delivered");
        }
    }
}

fn folder_node(id: &str, title: &str, parent: &str, index: u32) -> BookmarkNode {
    BookmarkNode {
        id: id.to_string(),
        title: title.to_string(),
        url: None,
        parent_id: Some(parent.to_string()),
        index: Some(index),
        date_added: None,
        children: Some(Vec::new()),
    }
}

fn find_mut<'a>(nodes: &'a mut [BookmarkNode], id: &str) -> Option<&'a mut BookmarkNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref_mut().and_then(|c| find_mut(c, id)) {
            return Some(found);
        }
    }
    None
}

#[async_trait]
impl BookmarksPort for InMemoryBookmarks {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        Ok(self.tree.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn create(&self, bookmark: NewBookmark) -> Result<BookmarkNode> {
        let parent_id = bookmark.parent_id.unwrap_or_else(|| "2".to_string());
        let node = {
            let mut tree = self.tree.lock().unwrap_or_else(PoisonError::into_inner);
            let parent = find_mut(&mut tree, &parent_id)
                .filter(|node| node.url.is_none())
                .ok_or_else(|| anyhow!("Can't find parent bookmark for id."))?;
            let children = parent.children.get_or_insert_with(Vec::new);

            let index = bookmark
                .index
                .map_or(children.len(), |i| (i as usize).min(children.len()));
            let node = BookmarkNode {
                id: self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
                title: bookmark.title,
                children: bookmark.url.is_none().then(Vec::new),
                url: bookmark.url,
                parent_id: Some(parent_id),
                index: Some(index as u32),
                date_added: Some(Utc::now().timestamp_millis()),
            };
            children.insert(index, node.clone());
            for (i, child) in children.iter_mut().enumerate() {
                child.index = Some(i as u32);
            }
            node
        };

        self.notify(BookmarkChangeKind::Created);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::host_channel;

    #[tokio::test]
    async fn creates_folder_under_parent_and_raises_event() {
        let (tx, mut rx) = host_channel();
        let bookmarks = InMemoryBookmarks::new(Some(tx));

        let node = bookmarks
            .create(NewBookmark {
                parent_id: Some("1".into()),
                title: "Work".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(node.parent_id.as_deref(), Some("1"));
        assert_eq!(node.children, Some(Vec::new()));
        let tree = bookmarks.get_tree().await.unwrap();
        let bar = &tree[0].children.as_ref().unwrap()[0];
        assert_eq!(bar.children.as_ref().unwrap()[0].title, "Work");
        assert!(matches!(
            rx.try_recv(),
            Ok(HostEvent::BookmarkChanged(BookmarkChangeKind::Created))
        ));
    }

    #[tokio::test]
    async fn unknown_parent_is_an_error() {
        let bookmarks = InMemoryBookmarks::new(None);

        let err = bookmarks
            .create(NewBookmark {
                parent_id: Some("404".into()),
                title: "x".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Can't find parent bookmark for id.");
    }
}
