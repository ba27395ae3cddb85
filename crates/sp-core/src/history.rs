//! Paste history.

use serde::{Deserialize, Serialize};

use crate::ids::{ClipboardItemId, SnippetId};

/// Maximum number of paste records retained.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// One successful paste into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_id: Option<SnippetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ClipboardItemId>,
    pub timestamp: i64,
    /// Page URL at paste time.
    pub url: String,
    /// Tag name of the element that received the content.
    pub element_type: String,
}
