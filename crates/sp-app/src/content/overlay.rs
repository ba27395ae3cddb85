//! Drives the pure overlay state machine against the live page.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use sp_core::overlay::{OverlayAction, OverlayEvent, OverlayKey, OverlayState, OverlayStateMachine};
use sp_core::page::PageEvent;
use sp_core::ports::{PageDocumentPort, RuntimeMessengerPort};
use sp_core::protocol::RuntimeMessage;
use tracing::{debug, warn};

use crate::managers::SnippetManager;

pub struct OverlayHandler {
    // Never held across an await.
    state: Mutex<OverlayState>,
    snippets: Arc<SnippetManager>,
    page: Arc<dyn PageDocumentPort>,
    messenger: Arc<dyn RuntimeMessengerPort>,
}

impl OverlayHandler {
    pub fn new(
        snippets: Arc<SnippetManager>,
        page: Arc<dyn PageDocumentPort>,
        messenger: Arc<dyn RuntimeMessengerPort>,
    ) -> Self {
        Self {
            state: Mutex::new(OverlayState::Closed),
            snippets,
            page,
            messenger,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).is_open()
    }

    /// Open with freshly loaded snippets, or close when already open.
    pub async fn toggle(&self) -> Result<()> {
        let event = if self.is_open() {
            OverlayEvent::Close
        } else {
            OverlayEvent::Open {
                snippets: self.snippets.list().await?,
            }
        };
        self.dispatch(event).await;
        Ok(())
    }

    pub async fn handle_page_event(&self, event: PageEvent) {
        let event = match event {
            PageEvent::KeyDown { key } => OverlayEvent::Key(OverlayKey::from_dom_key(&key)),
            PageEvent::SearchInput { value } => OverlayEvent::SearchInput(value),
            PageEvent::ItemClick { snippet_id } => OverlayEvent::ItemClick(snippet_id),
        };
        self.dispatch(event).await;
    }

    async fn dispatch(&self, event: OverlayEvent) {
        let actions = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let current = std::mem::replace(&mut *state, OverlayState::Closed);
            let (next, actions) = OverlayStateMachine::transition(current, event);
            *state = next;
            actions
        };

        for action in actions {
            self.execute(action).await;
        }
    }

    async fn execute(&self, action: OverlayAction) {
        match action {
            OverlayAction::Render(view) => {
                if let Err(e) = self.page.show_overlay(&view.markup()) {
                    warn!(error = %e, "failed to render overlay");
                }
            }
            OverlayAction::Dismiss => self.page.remove_overlay(),
            OverlayAction::Commit { snippet_id } => {
                debug!(%snippet_id, "overlay selection committed");
                let message = RuntimeMessage::PasteSnippetDirect { snippet_id };
                match self.messenger.send_to_background(&message).await {
                    Ok(response) if !response.success => {
                        warn!(error = ?response.error, "overlay paste was not applied");
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "overlay paste request failed"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_store, FakePage, FixedClock, RecordingMessenger};
    use sp_core::overlay::{EMPTY_PLACEHOLDER, OVERLAY_CLASS};
    use sp_core::snippet::NewSnippet;
    use sp_core::Snippet;

    struct Fixture {
        overlay: OverlayHandler,
        page: Arc<FakePage>,
        messenger: Arc<RecordingMessenger>,
        snippets: Vec<Snippet>,
    }

    async fn fixture(titles: &[&str]) -> Fixture {
        let manager = Arc::new(SnippetManager::new(memory_store(), FixedClock::new(1)));
        let mut snippets = Vec::new();
        for title in titles {
            let snippet = manager
                .create(NewSnippet {
                    title: title.to_string(),
                    content: format!("{title} body"),
                    ..Default::default()
                })
                .await
                .unwrap();
            snippets.push(snippet);
        }
        let page = FakePage::focused_on(None);
        let messenger = Arc::new(RecordingMessenger::default());
        Fixture {
            overlay: OverlayHandler::new(manager, page.clone(), messenger.clone()),
            page,
            messenger,
            snippets,
        }
    }

    fn key(name: &str) -> PageEvent {
        PageEvent::KeyDown {
            key: name.to_string(),
        }
    }

    #[tokio::test]
    async fn toggle_opens_then_closes() {
        let f = fixture(&["Foo", "Bar"]).await;

        f.overlay.toggle().await.unwrap();
        let markup = f.page.overlay_markup().unwrap();
        assert!(markup.contains(OVERLAY_CLASS));
        assert!(markup.contains("Foo"));

        f.overlay.toggle().await.unwrap();
        assert!(!f.overlay.is_open());
        assert!(f.page.overlay_markup().is_none());
    }

    #[tokio::test]
    async fn search_filters_and_shows_placeholder() {
        let f = fixture(&["Foo", "Bar"]).await;
        f.overlay.toggle().await.unwrap();

        f.overlay
            .handle_page_event(PageEvent::SearchInput { value: "fo".into() })
            .await;
        let markup = f.page.overlay_markup().unwrap();
        assert!(markup.contains("Foo"));
        assert!(!markup.contains("Bar body"));

        f.overlay
            .handle_page_event(PageEvent::SearchInput { value: "zzz".into() })
            .await;
        assert!(f.page.overlay_markup().unwrap().contains(EMPTY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn enter_commits_selected_snippet_and_closes() {
        let f = fixture(&["A", "B", "C"]).await;
        f.overlay.toggle().await.unwrap();

        f.overlay.handle_page_event(key("ArrowDown")).await;
        f.overlay.handle_page_event(key("Enter")).await;

        assert_eq!(
            f.messenger.sent(),
            vec![RuntimeMessage::PasteSnippetDirect {
                snippet_id: f.snippets[1].id.clone()
            }]
        );
        assert!(!f.overlay.is_open());
        assert!(f.page.overlay_markup().is_none());
    }

    #[tokio::test]
    async fn escape_closes_without_sending() {
        let f = fixture(&["A"]).await;
        f.overlay.toggle().await.unwrap();

        f.overlay.handle_page_event(key("Escape")).await;

        assert!(f.messenger.sent().is_empty());
        assert!(f.page.overlay_markup().is_none());
    }

    #[tokio::test]
    async fn click_on_listed_snippet_commits() {
        let f = fixture(&["A", "B"]).await;
        f.overlay.toggle().await.unwrap();

        f.overlay
            .handle_page_event(PageEvent::ItemClick {
                snippet_id: f.snippets[1].id.clone(),
            })
            .await;

        assert_eq!(f.messenger.sent().len(), 1);
        assert!(!f.overlay.is_open());
    }

    #[tokio::test]
    async fn keys_are_ignored_while_closed() {
        let f = fixture(&["A"]).await;

        f.overlay.handle_page_event(key("Enter")).await;

        assert!(f.messenger.sent().is_empty());
        assert!(f.page.overlay_markup().is_none());
    }
}
