//! Entity managers: typed collections persisted under fixed storage keys.

mod clipboard;
mod history;
mod snapshots;
mod snippets;
mod ui_state;

pub use clipboard::ClipboardStore;
pub use history::PasteHistory;
pub use snapshots::SnapshotManager;
pub use snippets::SnippetManager;
pub use ui_state::UiStateStore;
