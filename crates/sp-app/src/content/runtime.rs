use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sp_core::page::{ActiveElementInfo, PageEvent};
use sp_core::ports::{ContentScriptPort, PageDocumentPort};
use sp_core::protocol::{MessageResponse, ProtocolError, RuntimeMessage};
use tracing::{debug, warn};

use super::overlay::OverlayHandler;
use super::paste::{PasteHandler, PasteOrigin};
use crate::deps::ContentDeps;
use crate::managers::{PasteHistory, SnippetManager};
use crate::storage::TypedStore;

/// Content script of one tab: answers runtime messages and owns the overlay.
pub struct ContentRuntime {
    page: Arc<dyn PageDocumentPort>,
    snippets: Arc<SnippetManager>,
    paste: PasteHandler,
    overlay: OverlayHandler,
}

impl ContentRuntime {
    pub fn new(deps: ContentDeps) -> Self {
        let store = TypedStore::new(deps.storage);
        let snippets = Arc::new(SnippetManager::new(store.clone(), deps.clock.clone()));
        let history = Arc::new(PasteHistory::new(
            store,
            deps.config.storage.max_history_entries,
        ));

        Self {
            paste: PasteHandler::new(deps.page.clone(), history, deps.clock),
            overlay: OverlayHandler::new(snippets.clone(), deps.page.clone(), deps.messenger),
            page: deps.page,
            snippets,
        }
    }

    pub fn overlay(&self) -> &OverlayHandler {
        &self.overlay
    }

    async fn handle(&self, message: RuntimeMessage) -> anyhow::Result<MessageResponse> {
        let response = match message {
            RuntimeMessage::Ping | RuntimeMessage::BookmarksUpdated => MessageResponse::ok(),
            RuntimeMessage::PasteClipboardItem { content, item_id } => {
                let pasted = self.paste.paste(&content, PasteOrigin::ClipboardItem(item_id)).await;
                MessageResponse::from_result(pasted)
            }
            RuntimeMessage::PasteDirectValue { content } => {
                MessageResponse::from_result(self.paste.paste(&content, PasteOrigin::Direct).await)
            }
            RuntimeMessage::PasteSnippet { snippet_id } => match self.snippets.get(&snippet_id).await? {
                Some(snippet) => {
                    let pasted = self
                        .paste
                        .paste(&snippet.content, PasteOrigin::Snippet(snippet.id))
                        .await;
                    MessageResponse::from_result(pasted)
                }
                None => MessageResponse::failure("Snippet not found"),
            },
            RuntimeMessage::OpenOverlay => {
                self.overlay.toggle().await?;
                MessageResponse::ok()
            }
            RuntimeMessage::GetActiveElementInfo => {
                let info = self.page.active_element().as_ref().map(ActiveElementInfo::describe);
                MessageResponse::ok().with("info", info)
            }
            RuntimeMessage::PasteSnippetDirect { .. }
            | RuntimeMessage::GetBookmarks
            | RuntimeMessage::CreateFolder { .. }
            | RuntimeMessage::GetAuthToken { .. }
            | RuntimeMessage::RemoveAuthToken { .. }
            | RuntimeMessage::ClearAllTokens
            | RuntimeMessage::GetUserInfo { .. } => MessageResponse::failure("Unknown action"),
        };
        Ok(response)
    }
}

#[async_trait]
impl ContentScriptPort for ContentRuntime {
    async fn on_message(&self, message: Value) -> MessageResponse {
        let message = match RuntimeMessage::from_value(message) {
            Ok(message) => message,
            Err(ProtocolError::MissingAction | ProtocolError::UnknownAction(_)) => {
                return MessageResponse::failure("Unknown action");
            }
            Err(e) => return MessageResponse::failure(e.to_string()),
        };
        let action = message.action();
        debug!(action, "content message received");

        self.handle(message).await.unwrap_or_else(|e| {
            warn!(action, error = %format!("{e:#}"), "content script error");
            MessageResponse::failure(e.to_string())
        })
    }

    async fn on_page_event(&self, event: PageEvent) {
        self.overlay.handle_page_event(event).await;
    }
}
