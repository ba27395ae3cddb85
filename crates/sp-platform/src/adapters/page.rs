use std::sync::{Mutex, MutexGuard, PoisonError};

use sp_core::page::{ActiveElement, DomError, DomEvent};
use sp_core::ports::PageDocumentPort;

#[derive(Default)]
struct PageState {
    focused: Option<ActiveElement>,
    overlay: Option<String>,
    dispatched: Vec<DomEvent>,
}

/// Document of one simulated tab.
pub struct InMemoryPage {
    href: String,
    state: Mutex<PageState>,
}

impl InMemoryPage {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            state: Mutex::new(PageState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn focus(&self, element: ActiveElement) {
        self.state().focused = Some(element);
    }

    pub fn blur(&self) {
        self.state().focused = None;
    }

    pub fn focused(&self) -> Option<ActiveElement> {
        self.state().focused.clone()
    }

    pub fn overlay_markup(&self) -> Option<String> {
        self.state().overlay.clone()
    }

    /// Events dispatched on committed elements, oldest first.
    pub fn dispatched_events(&self) -> Vec<DomEvent> {
        self.state().dispatched.clone()
    }
}

impl PageDocumentPort for InMemoryPage {
    fn location_href(&self) -> String {
        self.href.clone()
    }

    fn active_element(&self) -> Option<ActiveElement> {
        self.focused()
    }

    fn commit_element(&self, element: &ActiveElement, events: &[DomEvent]) -> Result<(), DomError> {
        let mut state = self.state();
        if state.focused.is_none() {
            return Err(DomError::Detached);
        }
        state.focused = Some(element.clone());
        state.dispatched.extend_from_slice(events);
        Ok(())
    }

    fn show_overlay(&self, markup: &str) -> Result<(), DomError> {
        self.state().overlay = Some(markup.to_string());
        Ok(())
    }

    fn remove_overlay(&self) {
        self.state().overlay = None;
    }
}
