//! ShortcutPaste application layer.
//!
//! Entity managers over the key-value store, the background coordinator
//! that reacts to host events, and the content runtime that runs inside
//! each tab.

pub mod background;
pub mod content;
pub mod deps;
pub mod managers;
pub mod storage;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;

pub use background::BackgroundCoordinator;
pub use content::ContentRuntime;
pub use deps::{BackgroundDeps, ContentDeps};
pub use storage::TypedStore;
