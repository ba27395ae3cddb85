use crate::page::{ActiveElement, DomError, DomEvent};

/// Live document of the tab a content script runs in.
pub trait PageDocumentPort: Send + Sync {
    fn location_href(&self) -> String;

    /// Snapshot of the focused element, `None` when nothing is focused.
    fn active_element(&self) -> Option<ActiveElement>;

    /// Write `element` back to the focused node and dispatch `events` on it.
    fn commit_element(&self, element: &ActiveElement, events: &[DomEvent]) -> Result<(), DomError>;

    /// Insert or replace the overlay root with `markup`.
    fn show_overlay(&self, markup: &str) -> Result<(), DomError>;

    fn remove_overlay(&self);
}
