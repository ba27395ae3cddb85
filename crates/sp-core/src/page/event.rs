use serde::{Deserialize, Serialize};

use crate::ids::SnippetId;

/// User interaction with overlay UI injected into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PageEvent {
    /// `keydown` captured at the document level; `key` is `KeyboardEvent.key`.
    KeyDown { key: String },
    /// `input` on the overlay search box.
    SearchInput { value: String },
    ItemClick {
        #[serde(rename = "snippetId")]
        snippet_id: SnippetId,
    },
}
