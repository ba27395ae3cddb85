//! Overlay state machine.

use super::render::{render_overlay, OverlayView};
use crate::ids::SnippetId;
use crate::snippet::{filter_snippets, Snippet};

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Escape,
    ArrowDown,
    ArrowUp,
    Enter,
    Other,
}

impl OverlayKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" => Self::Escape,
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "Enter" => Self::Enter,
            _ => Self::Other,
        }
    }
}

/// Data held while the overlay is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySession {
    pub snippets: Vec<Snippet>,
    pub search_term: String,
    pub selected_index: usize,
}

impl OverlaySession {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self {
            snippets,
            search_term: String::new(),
            selected_index: 0,
        }
    }

    /// Snippets matching the current search term, in stored order.
    pub fn visible(&self) -> Vec<&Snippet> {
        filter_snippets(&self.snippets, &self.search_term)
    }

    pub fn view(&self) -> OverlayView {
        render_overlay(&self.visible(), self.selected_index)
    }

    fn selected_id(&self) -> Option<SnippetId> {
        self.visible()
            .get(self.selected_index)
            .map(|snippet| snippet.id.clone())
    }

    fn last_index(&self) -> usize {
        self.visible().len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open(OverlaySession),
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Show the overlay with freshly loaded snippets.
    Open { snippets: Vec<Snippet> },
    Close,
    Key(OverlayKey),
    SearchInput(String),
    ItemClick(SnippetId),
}

/// Side effects for the content runtime to execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    Render(OverlayView),
    Dismiss,
    /// Paste the snippet through the background and record history.
    Commit { snippet_id: SnippetId },
}

/// Pure overlay state machine.
pub struct OverlayStateMachine;

impl OverlayStateMachine {
    pub fn transition(state: OverlayState, event: OverlayEvent) -> (OverlayState, Vec<OverlayAction>) {
        match (state, event) {
            (OverlayState::Closed, OverlayEvent::Open { snippets }) => {
                let session = OverlaySession::new(snippets);
                let view = session.view();
                (OverlayState::Open(session), vec![OverlayAction::Render(view)])
            }
            (OverlayState::Open(_), OverlayEvent::Open { .. })
            | (OverlayState::Open(_), OverlayEvent::Close)
            | (OverlayState::Open(_), OverlayEvent::Key(OverlayKey::Escape)) => {
                (OverlayState::Closed, vec![OverlayAction::Dismiss])
            }
            (OverlayState::Open(mut session), OverlayEvent::Key(OverlayKey::ArrowDown)) => {
                session.selected_index = (session.selected_index + 1).min(session.last_index());
                let view = session.view();
                (OverlayState::Open(session), vec![OverlayAction::Render(view)])
            }
            (OverlayState::Open(mut session), OverlayEvent::Key(OverlayKey::ArrowUp)) => {
                session.selected_index = session.selected_index.saturating_sub(1);
                let view = session.view();
                (OverlayState::Open(session), vec![OverlayAction::Render(view)])
            }
            (OverlayState::Open(session), OverlayEvent::Key(OverlayKey::Enter)) => {
                match session.selected_id() {
                    Some(snippet_id) => commit(snippet_id),
                    None => (OverlayState::Open(session), Vec::new()),
                }
            }
            (OverlayState::Open(mut session), OverlayEvent::SearchInput(term)) => {
                session.search_term = term;
                session.selected_index = 0;
                let view = session.view();
                (OverlayState::Open(session), vec![OverlayAction::Render(view)])
            }
            (OverlayState::Open(session), OverlayEvent::ItemClick(snippet_id)) => {
                if session.snippets.iter().any(|s| s.id == snippet_id) {
                    commit(snippet_id)
                } else {
                    (OverlayState::Open(session), Vec::new())
                }
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}

fn commit(snippet_id: SnippetId) -> (OverlayState, Vec<OverlayAction>) {
    (
        OverlayState::Closed,
        vec![OverlayAction::Commit { snippet_id }, OverlayAction::Dismiss],
    )
}
