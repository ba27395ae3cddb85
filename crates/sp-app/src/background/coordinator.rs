use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use sp_core::bookmark::BookmarkChangeKind;
use sp_core::host_event::{HostEvent, HostEventKind};
use sp_core::protocol::{MessageResponse, ProtocolError, Reply, RuntimeMessage};
use tracing::{debug, error, info, warn};

use super::auth::AuthBridge;
use super::bookmarks::BookmarkSync;
use super::commands::{CommandHandler, PasteOutcome};
use super::content_scripts::ContentScriptManager;
use super::notifier::UserNotifier;
use crate::deps::BackgroundDeps;
use crate::managers::{ClipboardStore, SnippetManager};
use crate::storage::TypedStore;
use crate::task::spawn_logged;

const UNKNOWN_ACTION: &str = "Unknown action";

/// What the coordinator does for a subscribed event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subscription {
    SyncBookmarks,
    RunCommand,
    AnswerMessage,
}

pub struct BackgroundCoordinator {
    subscriptions: HashMap<HostEventKind, Subscription>,
    bookmarks: BookmarkSync,
    commands: CommandHandler,
    auth: AuthBridge,
    clipboard: Arc<ClipboardStore>,
    snippets: Arc<SnippetManager>,
}

impl BackgroundCoordinator {
    pub fn new(deps: BackgroundDeps) -> Self {
        let store = TypedStore::new(deps.storage);
        let notifier = UserNotifier::new(deps.notifications);
        let scripts = Arc::new(ContentScriptManager::new(
            deps.tabs,
            deps.scripting,
            deps.config.messaging.clone(),
            deps.config.tabs.extra_restricted_prefixes.clone(),
        ));
        let clipboard = Arc::new(ClipboardStore::new(
            store.clone(),
            deps.clock.clone(),
            deps.config.storage.max_clipboard_items,
        ));
        let snippets = Arc::new(SnippetManager::new(store.clone(), deps.clock));

        Self {
            subscriptions: subscription_table(),
            bookmarks: BookmarkSync::new(deps.bookmarks, store, scripts.clone()),
            commands: CommandHandler::new(scripts, clipboard.clone(), snippets.clone(), notifier),
            auth: AuthBridge::new(deps.identity, deps.user_info),
            clipboard,
            snippets,
        }
    }

    /// Event kinds this coordinator listens to.
    pub fn subscriptions(&self) -> Vec<HostEventKind> {
        self.subscriptions.keys().copied().collect()
    }

    pub fn is_subscribed(&self, kind: HostEventKind) -> bool {
        self.subscriptions.contains_key(&kind)
    }

    pub fn clipboard(&self) -> &Arc<ClipboardStore> {
        &self.clipboard
    }

    pub fn snippets(&self) -> &Arc<SnippetManager> {
        &self.snippets
    }

    pub fn bookmarks(&self) -> &BookmarkSync {
        &self.bookmarks
    }

    pub fn commands(&self) -> &CommandHandler {
        &self.commands
    }

    /// Dispatch one host event through the subscription table.
    pub async fn handle_event(&self, event: HostEvent) -> Result<()> {
        let kind = event.kind();
        let Some(subscription) = self.subscriptions.get(&kind).copied() else {
            debug!(?kind, "no subscriber for host event");
            return Ok(());
        };

        match (subscription, event) {
            (Subscription::SyncBookmarks, event) => {
                info!(?event, "resyncing bookmarks");
                self.bookmarks.resync().await
            }
            (Subscription::RunCommand, HostEvent::Command(name)) => self.commands.run(&name).await,
            (Subscription::AnswerMessage, HostEvent::Message { message, responder }) => {
                responder.send(self.handle_message(message).await);
                Ok(())
            }
            (subscription, event) => {
                error!(?subscription, ?event, "subscription table routed event to the wrong handler");
                Ok(())
            }
        }
    }

    /// Answer a message. Unknown actions are answered at once; everything
    /// else completes on a spawned task through a deferred reply.
    pub fn dispatch_message(self: &Arc<Self>, raw: Value) -> Reply {
        if let Err(e) = peek_action(&raw) {
            return Reply::Immediate(protocol_failure(&e));
        }

        let (responder, reply) = Reply::deferred();
        let this = Arc::clone(self);
        spawn_logged("background_message", async move {
            responder.send(this.handle_message(raw).await);
            Ok(())
        });
        reply
    }

    pub async fn handle_message(&self, raw: Value) -> MessageResponse {
        let message = match RuntimeMessage::from_value(raw) {
            Ok(message) => message,
            Err(e) => return protocol_failure(&e),
        };
        let action = message.action();
        debug!(action, "background message received");

        let result: Result<MessageResponse> = match message {
            RuntimeMessage::Ping => Ok(MessageResponse::ok()),
            RuntimeMessage::GetBookmarks => self
                .bookmarks
                .cached_tree()
                .await
                .map(|tree| MessageResponse::ok().with("bookmarks", tree)),
            RuntimeMessage::CreateFolder { folder } => self
                .bookmarks
                .create_folder(folder)
                .await
                .map(|node| MessageResponse::ok().with("node", node)),
            RuntimeMessage::GetAuthToken { interactive } => self
                .auth
                .get_auth_token(interactive)
                .await
                .map(|token| MessageResponse::ok().with("token", token)),
            RuntimeMessage::RemoveAuthToken { token } => self
                .auth
                .remove_auth_token(&token)
                .await
                .map(|()| MessageResponse::ok()),
            RuntimeMessage::ClearAllTokens => {
                self.auth.clear_all_tokens().await.map(|()| MessageResponse::ok())
            }
            RuntimeMessage::GetUserInfo { token } => self
                .auth
                .user_info(&token)
                .await
                .map(|info| MessageResponse::ok().with("userInfo", info)),
            RuntimeMessage::PasteSnippetDirect { snippet_id } => {
                Ok(match self.commands.paste_snippet(snippet_id).await {
                    PasteOutcome::Pasted => MessageResponse::ok(),
                    PasteOutcome::NotPasted(Some(reason)) => MessageResponse::failure(reason),
                    PasteOutcome::NotPasted(None) => MessageResponse::unsuccessful(),
                    PasteOutcome::Rejected(e) => MessageResponse::failure(e.to_string()),
                    PasteOutcome::Unreachable(e) => MessageResponse::failure(e.to_string()),
                })
            }
            RuntimeMessage::PasteClipboardItem { .. }
            | RuntimeMessage::PasteDirectValue { .. }
            | RuntimeMessage::PasteSnippet { .. }
            | RuntimeMessage::OpenOverlay
            | RuntimeMessage::GetActiveElementInfo
            | RuntimeMessage::BookmarksUpdated => Ok(MessageResponse::failure(UNKNOWN_ACTION)),
        };

        result.unwrap_or_else(|e| {
            warn!(action, error = %format!("{e:#}"), "background message failed");
            MessageResponse::failure(e.to_string())
        })
    }
}

fn subscription_table() -> HashMap<HostEventKind, Subscription> {
    let mut table = HashMap::from([
        (HostEventKind::Installed, Subscription::SyncBookmarks),
        (HostEventKind::Startup, Subscription::SyncBookmarks),
        (HostEventKind::Command, Subscription::RunCommand),
        (HostEventKind::Message, Subscription::AnswerMessage),
    ]);
    for change in [
        BookmarkChangeKind::Created,
        BookmarkChangeKind::Removed,
        BookmarkChangeKind::Changed,
        BookmarkChangeKind::Moved,
        BookmarkChangeKind::ChildrenReordered,
    ] {
        table.insert(HostEventKind::Bookmark(change), Subscription::SyncBookmarks);
    }
    table
}

fn peek_action(raw: &Value) -> Result<(), ProtocolError> {
    let action = raw
        .get("action")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingAction)?;
    if RuntimeMessage::ACTIONS.contains(&action) {
        Ok(())
    } else {
        Err(ProtocolError::UnknownAction(action.to_string()))
    }
}

fn protocol_failure(err: &ProtocolError) -> MessageResponse {
    match err {
        ProtocolError::MissingAction | ProtocolError::UnknownAction(_) => {
            MessageResponse::failure(UNKNOWN_ACTION)
        }
        other => MessageResponse::failure(other.to_string()),
    }
}
