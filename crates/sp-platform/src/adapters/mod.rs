//! # Host adapters
//!
//! - `browser` - simulated tabs with on-demand content-script injection
//! - `page` - in-memory page document with a focused element
//! - `bookmarks` - in-memory bookmark tree raising change events
//! - `identity` - cached OAuth token provider
//! - `user_info` - Google userinfo client over HTTP
//! - `notifier` - notifications surfaced through tracing and an optional sink
//! - `messenger` - content-to-background channel

pub mod bookmarks;
pub mod browser;
pub mod identity;
pub mod messenger;
pub mod notifier;
pub mod page;
pub mod user_info;

pub use bookmarks::InMemoryBookmarks;
pub use browser::{BrowserError, ContentScriptFactory, SimulatedBrowser};
pub use identity::LocalIdentityProvider;
pub use messenger::ChannelRuntimeMessenger;
pub use notifier::TracingNotifier;
pub use page::InMemoryPage;
pub use user_info::GoogleUserInfoClient;
