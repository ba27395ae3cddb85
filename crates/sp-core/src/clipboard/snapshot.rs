use serde::{Deserialize, Serialize};

use super::folder::FolderRecord;
use super::item::ClipboardItem;
use crate::ids::SnapshotId;

/// Point-in-time backup of the clipboard items and folders.
///
/// Snapshots are never mutated after creation; folders are stored in their
/// flattened form, exactly as the live collection is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardSnapshot {
    pub id: SnapshotId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<ClipboardItem>,
    pub folders: Vec<FolderRecord>,
    pub created_at: i64,
}
