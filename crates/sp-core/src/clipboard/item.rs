use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{ClipboardItemId, FolderId};

/// Maximum number of clipboard items retained in the collection.
pub const MAX_CLIPBOARD_ITEMS: usize = 1000;

const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Url,
    Html,
}

impl ContentType {
    /// Classify captured text the way the popup capture loop does.
    pub fn detect(content: &str) -> Self {
        if content.starts_with("data:image/") {
            Self::Image
        } else if content.starts_with("http://") || content.starts_with("https://") {
            Self::Url
        } else if content.contains('<') && content.contains('>') {
            Self::Html
        } else {
            Self::Text
        }
    }
}

/// A captured clipboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: ClipboardItemId,
    pub title: String,
    /// Stored content. Values that are not JSON strings decode as empty and
    /// are rejected before any paste is attempted.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub size: u64,
    pub timestamp: i64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

impl ClipboardItem {
    pub fn create(id: ClipboardItemId, fields: NewClipboardItem, now_ms: i64) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            content_type: fields.content_type,
            size: fields.size,
            timestamp: now_ms,
            is_favorite: fields.is_favorite,
            folder_id: fields.folder_id,
        }
    }

    /// Content usable for pasting: present and not only whitespace.
    pub fn pasteable_content(&self) -> Option<&str> {
        if self.content.trim().is_empty() {
            None
        } else {
            Some(&self.content)
        }
    }

    pub fn apply(&mut self, patch: ClipboardItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.size = content.len() as u64;
            self.content = content;
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = folder_id;
        }
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Caller-supplied fields for a new item; `id` and `timestamp` are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClipboardItem {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub size: u64,
    pub is_favorite: bool,
    pub folder_id: Option<FolderId>,
}

impl NewClipboardItem {
    /// Build an item from raw captured text, deriving type, title and size.
    pub fn from_text(text: &str) -> Self {
        Self {
            title: generate_title(text),
            content: text.to_string(),
            content_type: ContentType::detect(text),
            size: text.len() as u64,
            is_favorite: false,
            folder_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardItemPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<ContentType>,
    pub is_favorite: Option<bool>,
    pub folder_id: Option<Option<FolderId>>,
}

/// First line of `content`, trimmed and shortened to 50 characters.
pub fn generate_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default().trim();
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        return first_line.to_string();
    }
    let mut title: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    title.push_str("...");
    title
}

/// Popup list filter: free-text search plus an optional type restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub search: String,
    pub content_type: Option<ContentType>,
}

impl ItemFilter {
    pub fn matches(&self, item: &ClipboardItem) -> bool {
        let matches_type = self.content_type.map_or(true, |t| t == item.content_type);
        if !matches_type {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.title.to_lowercase().contains(&needle) || item.content.to_lowercase().contains(&needle)
    }
}

/// Insert `item` at the front and truncate to `cap`, evicting the oldest.
pub fn push_capped(items: &mut Vec<ClipboardItem>, item: ClipboardItem, cap: usize) {
    items.insert(0, item);
    items.truncate(cap);
}
