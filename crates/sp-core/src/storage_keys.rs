//! Persisted storage keys.

pub const SNIPPETS: &str = "shortcutpaste_snippets";
pub const CLIPBOARD_ITEMS: &str = "clipboard_items";
pub const CLIPBOARD_FOLDERS: &str = "clipboard_folders";
pub const CLIPBOARD_SNAPSHOTS: &str = "clipboard_snapshots";
pub const BOOKMARK_TREE: &str = "bookmarkTree";
pub const ACTIVE_UI_PANEL: &str = "flexbookmark_active_tab";
pub const PASTE_HISTORY: &str = "shortcutpaste_history";
