//! # sp-platform
//!
//! Host-side implementations of the ShortcutPaste ports.
//!
//! The browser surfaces (tabs, scripting, bookmarks, page documents) are
//! simulated in process so the runtime can be driven from a terminal or a
//! test; identity and user-info talk to the real OAuth endpoints.

pub mod adapters;
pub mod app_dirs;
pub mod runtime;

pub use adapters::{
    ChannelRuntimeMessenger, ContentScriptFactory, GoogleUserInfoClient, InMemoryBookmarks,
    InMemoryPage, LocalIdentityProvider, SimulatedBrowser, TracingNotifier,
};
pub use app_dirs::DataDirResolver;
pub use runtime::{host_channel, HostEventReceiver, HostEventSender};
