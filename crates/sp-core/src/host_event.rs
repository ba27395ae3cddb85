//! Host lifecycle events delivered to the background coordinator.

use serde_json::Value;

use crate::bookmark::BookmarkChangeKind;
use crate::protocol::Responder;

/// An event raised by the browser host.
#[derive(Debug)]
pub enum HostEvent {
    /// Extension installed or updated.
    Installed,
    /// Browser profile started.
    Startup,
    /// Bookmark tree mutated.
    BookmarkChanged(BookmarkChangeKind),
    /// Keyboard-shortcut command fired.
    Command(String),
    /// Cross-process runtime message awaiting a reply.
    Message { message: Value, responder: Responder },
}

/// Subscription key for [`HostEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    Installed,
    Startup,
    Bookmark(BookmarkChangeKind),
    Command,
    Message,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::Installed => HostEventKind::Installed,
            HostEvent::Startup => HostEventKind::Startup,
            HostEvent::BookmarkChanged(change) => HostEventKind::Bookmark(*change),
            HostEvent::Command(_) => HostEventKind::Command,
            HostEvent::Message { .. } => HostEventKind::Message,
        }
    }
}
