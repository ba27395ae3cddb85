//! Bookmark tree mirror.

use serde::{Deserialize, Serialize};

/// Node of the host bookmark tree. Folders carry `children`, links carry `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

/// Creation request for a bookmark or bookmark folder (no `url`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Bookmark mutation events that trigger a resync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookmarkChangeKind {
    Created,
    Removed,
    Changed,
    Moved,
    ChildrenReordered,
}

/// Default parent for new folders: the top-level node whose title contains
/// "other bookmarks" (case-insensitive), else the tree root.
pub fn default_folder_parent(tree: &[BookmarkNode]) -> Option<String> {
    let root = tree.first()?;
    root.children
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|node| node.title.to_lowercase().contains("other bookmarks"))
        .map(|node| node.id.clone())
        .or_else(|| Some(root.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, title: &str, children: Vec<BookmarkNode>) -> BookmarkNode {
        BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            parent_id: None,
            index: None,
            date_added: None,
            children: Some(children),
        }
    }

    #[test]
    fn prefers_other_bookmarks_folder() {
        let tree = vec![folder(
            "0",
            "",
            vec![folder("1", "Bookmarks Bar", vec![]), folder("2", "Other Bookmarks", vec![])],
        )];

        assert_eq!(default_folder_parent(&tree).as_deref(), Some("2"));
    }

    #[test]
    fn falls_back_to_root() {
        let tree = vec![folder("0", "", vec![folder("1", "Bookmarks Bar", vec![])])];

        assert_eq!(default_folder_parent(&tree).as_deref(), Some("0"));
        assert_eq!(default_folder_parent(&[]), None);
    }
}
