use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ProtocolError;
use crate::bookmark::NewBookmark;
use crate::ids::{ClipboardItemId, SnippetId};

/// Command message exchanged between the background coordinator, content
/// scripts and the popup. On the wire it is `{ "action": <name>, ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeMessage {
    /// Liveness probe for an injected content script.
    Ping,
    PasteClipboardItem {
        #[serde(default)]
        content: String,
        #[serde(rename = "itemId", default, skip_serializing_if = "Option::is_none")]
        item_id: Option<ClipboardItemId>,
    },
    PasteDirectValue {
        #[serde(default)]
        content: String,
    },
    PasteSnippet {
        #[serde(rename = "snippetId")]
        snippet_id: SnippetId,
    },
    /// Paste request raised by the overlay, routed through the background.
    PasteSnippetDirect {
        #[serde(rename = "snippetId")]
        snippet_id: SnippetId,
    },
    OpenOverlay,
    GetActiveElementInfo,
    BookmarksUpdated,
    GetBookmarks,
    CreateFolder {
        folder: NewBookmark,
    },
    GetAuthToken {
        #[serde(default)]
        interactive: bool,
    },
    RemoveAuthToken {
        token: String,
    },
    ClearAllTokens,
    GetUserInfo {
        token: String,
    },
}

impl RuntimeMessage {
    /// Every action name understood by some runtime participant.
    pub const ACTIONS: &'static [&'static str] = &[
        "ping",
        "pasteClipboardItem",
        "pasteDirectValue",
        "pasteSnippet",
        "pasteSnippetDirect",
        "openOverlay",
        "getActiveElementInfo",
        "bookmarksUpdated",
        "getBookmarks",
        "createFolder",
        "getAuthToken",
        "removeAuthToken",
        "clearAllTokens",
        "getUserInfo",
    ];

    /// Decode a raw wire message, separating unknown actions from malformed
    /// payloads of known ones.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ProtocolError::MissingAction)?;

        if !Self::ACTIONS.contains(&action.as_str()) {
            return Err(ProtocolError::UnknownAction(action));
        }

        serde_json::from_value(value).map_err(|e| ProtocolError::InvalidPayload {
            action,
            reason: e.to_string(),
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Action name as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::PasteClipboardItem { .. } => "pasteClipboardItem",
            Self::PasteDirectValue { .. } => "pasteDirectValue",
            Self::PasteSnippet { .. } => "pasteSnippet",
            Self::PasteSnippetDirect { .. } => "pasteSnippetDirect",
            Self::OpenOverlay => "openOverlay",
            Self::GetActiveElementInfo => "getActiveElementInfo",
            Self::BookmarksUpdated => "bookmarksUpdated",
            Self::GetBookmarks => "getBookmarks",
            Self::CreateFolder { .. } => "createFolder",
            Self::GetAuthToken { .. } => "getAuthToken",
            Self::RemoveAuthToken { .. } => "removeAuthToken",
            Self::ClearAllTokens => "clearAllTokens",
            Self::GetUserInfo { .. } => "getUserInfo",
        }
    }
}
