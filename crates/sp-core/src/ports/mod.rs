//! Port interfaces for the application layer.
//!
//! Every host capability the runtime touches is reached through one of these
//! traits. Infrastructure (`sp-infra`) and platform (`sp-platform`) crates
//! implement them; use cases in `sp-app` only ever hold `Arc<dyn Port>`.

mod bookmarks;
mod clock;
mod content_script;
mod identity;
mod kv_store;
mod messenger;
mod notification;
mod page;
mod scripting;
mod tabs;
mod user_info;

pub use bookmarks::BookmarksPort;
pub use clock::ClockPort;
pub use content_script::ContentScriptPort;
pub use identity::IdentityPort;
pub use kv_store::{KeyValueStorePort, StorageError};
pub use messenger::RuntimeMessengerPort;
pub use notification::NotificationPort;
pub use page::PageDocumentPort;
pub use scripting::ScriptingPort;
pub use tabs::TabControllerPort;
pub use user_info::UserInfoPort;
