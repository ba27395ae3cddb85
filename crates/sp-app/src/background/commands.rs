//! Keyboard-shortcut command flows.

use std::sync::Arc;

use anyhow::Result;
use sp_core::protocol::{MessageResponse, RuntimeMessage, ShortcutCommand};
use sp_core::snippet::resolve_indexed_snippet;
use sp_core::tabs::TabInfo;
use sp_core::SnippetId;
use tracing::{debug, info, warn};

use super::content_scripts::ContentScriptManager;
use super::error::{MessagingError, PasteValidationError};
use super::notifier::UserNotifier;
use crate::managers::{ClipboardStore, SnippetManager};

/// Outcome of a paste request routed to the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    Pasted,
    /// The page answered but nothing was inserted (no editable focus).
    NotPasted(Option<String>),
    Rejected(PasteValidationError),
    Unreachable(MessagingError),
}

pub struct CommandHandler {
    scripts: Arc<ContentScriptManager>,
    clipboard: Arc<ClipboardStore>,
    snippets: Arc<SnippetManager>,
    notifier: UserNotifier,
}

impl CommandHandler {
    pub fn new(
        scripts: Arc<ContentScriptManager>,
        clipboard: Arc<ClipboardStore>,
        snippets: Arc<SnippetManager>,
        notifier: UserNotifier,
    ) -> Self {
        Self {
            scripts,
            clipboard,
            snippets,
            notifier,
        }
    }

    /// Run a raw command name. Unrecognized names are logged and ignored.
    pub async fn run(&self, name: &str) -> Result<()> {
        let command = match name.parse::<ShortcutCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!(command = name, error = %e, "ignoring unrecognized command");
                return Ok(());
            }
        };
        info!(command = name, "shortcut command received");

        match command {
            ShortcutCommand::OpenOverlay => {
                self.open_overlay().await;
            }
            ShortcutCommand::PasteFavorite => {
                self.paste_favorite().await?;
            }
            ShortcutCommand::PasteSnippet(n) => {
                self.paste_indexed_snippet(n).await?;
            }
        }
        Ok(())
    }

    /// Forward `openOverlay` to the active tab.
    pub async fn open_overlay(&self) -> bool {
        let result = async {
            let tab = self.prepared_tab().await?;
            self.scripts.send(tab.id, &RuntimeMessage::OpenOverlay).await
        }
        .await;

        match result {
            Ok(response) => response.success,
            Err(e) => {
                warn!(error = %e, "could not open overlay");
                self.notifier.messaging_failure(&e).await;
                false
            }
        }
    }

    pub async fn paste_favorite(&self) -> Result<PasteOutcome> {
        let Some(item) = self.clipboard.first_favorite().await? else {
            let rejection = PasteValidationError::NoFavorite;
            self.notifier
                .info(format!("{rejection}. Star a clipboard item to use this shortcut."))
                .await;
            return Ok(PasteOutcome::Rejected(rejection));
        };
        let Some(content) = item.pasteable_content() else {
            let rejection = PasteValidationError::EmptyContent;
            self.notifier.error(rejection.to_string()).await;
            return Ok(PasteOutcome::Rejected(rejection));
        };

        let message = RuntimeMessage::PasteClipboardItem {
            content: content.to_string(),
            item_id: Some(item.id.clone()),
        };
        let outcome = self.deliver_paste(&message).await;
        match &outcome {
            PasteOutcome::Pasted => {
                self.notifier
                    .success(format!("Pasted favorite: {}", item.title))
                    .await;
            }
            other => self.report_failure(other).await,
        }
        Ok(outcome)
    }

    /// `paste_snippet_<n>`: explicit shortcut binding first, then position.
    pub async fn paste_indexed_snippet(&self, n: usize) -> Result<PasteOutcome> {
        let snippets = self.snippets.list().await?;
        let Some(snippet) = resolve_indexed_snippet(&snippets, n) else {
            debug!(n, "no snippet for indexed shortcut");
            return Ok(PasteOutcome::Rejected(PasteValidationError::NoSnippetForShortcut(n)));
        };
        debug!(n, snippet_id = %snippet.id, "resolved indexed snippet");

        let outcome = self.paste_snippet(snippet.id.clone()).await;
        match &outcome {
            PasteOutcome::Pasted => {
                self.notifier.success(format!("Pasted snippet: {}", snippet.title)).await;
            }
            other => self.report_failure(other).await,
        }
        Ok(outcome)
    }

    /// Ask the active tab to paste a stored snippet.
    pub async fn paste_snippet(&self, snippet_id: SnippetId) -> PasteOutcome {
        self.deliver_paste(&RuntimeMessage::PasteSnippet { snippet_id })
            .await
    }

    async fn deliver_paste(&self, message: &RuntimeMessage) -> PasteOutcome {
        let result = async {
            let tab = self.prepared_tab().await?;
            self.scripts.send_with_retry(tab.id, message).await
        }
        .await;

        match result {
            Ok(MessageResponse { success: true, .. }) => PasteOutcome::Pasted,
            Ok(response) => PasteOutcome::NotPasted(response.error),
            Err(e) => PasteOutcome::Unreachable(e),
        }
    }

    async fn prepared_tab(&self) -> Result<TabInfo, MessagingError> {
        self.scripts.supported_active_tab().await
    }

    async fn report_failure(&self, outcome: &PasteOutcome) {
        match outcome {
            PasteOutcome::Pasted | PasteOutcome::Rejected(_) => {}
            PasteOutcome::NotPasted(reason) => {
                let message = reason.clone().unwrap_or_else(|| {
                    "Nothing was pasted. Click into a text field first.".to_string()
                });
                self.notifier.error(message).await;
            }
            PasteOutcome::Unreachable(e) => self.notifier.messaging_failure(e).await,
        }
    }
}
