//! # sp-core
//!
//! Core domain models and business rules for ShortcutPaste.
//!
//! This crate contains pure logic without any host dependencies: snippet and
//! clipboard entities, the folder tree build/flatten pair, the runtime
//! message protocol, the page element model used by the paste algorithm,
//! the overlay state machine, and the port traits every host adapter
//! implements.

pub mod bookmark;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod host_event;
pub mod ids;
pub mod notification;
pub mod overlay;
pub mod page;
pub mod ports;
pub mod protocol;
pub mod snippet;
pub mod storage_keys;
pub mod tabs;
pub mod ui;

// Re-export commonly used types at the crate root
pub use bookmark::{BookmarkChangeKind, BookmarkNode, NewBookmark};
pub use clipboard::{
    ClipboardFolder, ClipboardItem, ClipboardSnapshot, ContentType, FolderRecord,
};
pub use config::AppConfig;
pub use history::PasteRecord;
pub use host_event::{HostEvent, HostEventKind};
pub use ids::{ClipboardItemId, FolderId, SnapshotId, SnippetId};
pub use notification::{Notification, NotificationKind};
pub use protocol::{MessageResponse, Reply, Responder, RuntimeMessage, ShortcutCommand};
pub use snippet::Snippet;
pub use tabs::{TabId, TabInfo};
pub use ui::UiPanel;
