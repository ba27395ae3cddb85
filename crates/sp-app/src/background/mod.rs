//! Background coordinator: host lifecycle events, keyboard shortcuts and
//! cross-process messages.

mod auth;
mod bookmarks;
mod commands;
mod content_scripts;
mod coordinator;
mod error;
mod notifier;

pub use auth::AuthBridge;
pub use bookmarks::BookmarkSync;
pub use commands::{CommandHandler, PasteOutcome};
pub use content_scripts::ContentScriptManager;
pub use coordinator::BackgroundCoordinator;
pub use error::{MessagingError, PasteValidationError};
pub use notifier::{describe_messaging_failure, UserNotifier};
