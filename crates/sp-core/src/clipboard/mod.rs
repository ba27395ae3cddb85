//! Clipboard items, folders and snapshots.

pub mod folder;
pub mod item;
pub mod snapshot;

pub use folder::{build_tree, flatten_tree, ClipboardFolder, FolderRecord};
pub use item::{
    generate_title, ClipboardItem, ClipboardItemPatch, ContentType, ItemFilter, NewClipboardItem,
    MAX_CLIPBOARD_ITEMS,
};
pub use snapshot::ClipboardSnapshot;
