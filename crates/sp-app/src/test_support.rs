//! Hand-written port fakes shared by unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use sp_core::bookmark::{BookmarkNode, NewBookmark};
use sp_core::ports::{
    BookmarksPort, ClockPort, IdentityPort, NotificationPort, PageDocumentPort,
    RuntimeMessengerPort, ScriptingPort, TabControllerPort, UserInfoPort,
};
use sp_core::page::{ActiveElement, DomError, DomEvent};
use sp_core::protocol::{MessageResponse, RuntimeMessage};
use sp_core::tabs::{TabId, TabInfo};
use sp_core::Notification;
use sp_infra::InMemoryKeyValueStore;

use crate::storage::TypedStore;

pub const NO_RECEIVER: &str = "Could not establish connection. Receiving end does not exist.";

pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(ms: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(ms)))
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn memory_store() -> TypedStore {
    TypedStore::new(Arc::new(InMemoryKeyValueStore::new()))
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn taken(&self) -> Vec<Notification> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        self.notes.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Tabs + scripting fake. Content scripts answer only after injection.
pub struct FakeBrowser {
    pub tabs: Mutex<Vec<TabInfo>>,
    pub injected: Mutex<HashSet<TabId>>,
    pub inject_calls: AtomicUsize,
    pub sent: Mutex<Vec<(TabId, RuntimeMessage)>>,
    /// Number of upcoming sends that fail as if the script vanished.
    pub drop_next: AtomicUsize,
    pub paste_succeeds: AtomicBool,
}

impl FakeBrowser {
    pub fn with_active_tab(url: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            tabs: Mutex::new(vec![TabInfo {
                id: 1,
                url: url.map(str::to_string),
                active: true,
            }]),
            injected: Mutex::new(HashSet::new()),
            inject_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            drop_next: AtomicUsize::new(0),
            paste_succeeds: AtomicBool::new(true),
        })
    }

    pub fn add_tab(&self, id: TabId, url: &str) {
        self.tabs.lock().unwrap().push(TabInfo {
            id,
            url: Some(url.to_string()),
            active: false,
        });
    }

    pub fn mark_injected(&self, tab: TabId) {
        self.injected.lock().unwrap().insert(tab);
    }

    pub fn injections(&self) -> usize {
        self.inject_calls.load(Ordering::SeqCst)
    }

    /// Actions sent to `tab`, pings excluded.
    pub fn actions_for(&self, tab: TabId) -> Vec<RuntimeMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, msg)| *id == tab && *msg != RuntimeMessage::Ping)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

#[async_trait]
impl TabControllerPort for FakeBrowser {
    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        Ok(self.tabs.lock().unwrap().iter().find(|t| t.active).cloned())
    }

    async fn all_tabs(&self) -> Result<Vec<TabInfo>> {
        Ok(self.tabs.lock().unwrap().clone())
    }

    async fn send_message(&self, tab: TabId, message: &RuntimeMessage) -> Result<MessageResponse> {
        self.sent.lock().unwrap().push((tab, message.clone()));
        if !self.tabs.lock().unwrap().iter().any(|t| t.id == tab) {
            return Err(anyhow!("No tab with id: {tab}."));
        }
        let dropped = self
            .drop_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if dropped || !self.injected.lock().unwrap().contains(&tab) {
            return Err(anyhow!(NO_RECEIVER));
        }
        Ok(match message {
            RuntimeMessage::PasteClipboardItem { .. }
            | RuntimeMessage::PasteDirectValue { .. }
            | RuntimeMessage::PasteSnippet { .. } => MessageResponse::from_result(self.paste_succeeds.load(Ordering::SeqCst)),
            _ => MessageResponse::ok(),
        })
    }
}

#[async_trait]
impl ScriptingPort for FakeBrowser {
    async fn inject_content_script(&self, tab: TabId) -> Result<()> {
        self.inject_calls.fetch_add(1, Ordering::SeqCst);
        self.injected.lock().unwrap().insert(tab);
        Ok(())
    }
}

mock! {
    pub Identity {}

    #[async_trait]
    impl IdentityPort for Identity {
        async fn get_auth_token(&self, interactive: bool) -> Result<String>;
        async fn remove_cached_token(&self, token: &str) -> Result<()>;
        async fn clear_all_cached_tokens(&self) -> Result<()>;
    }
}

mock! {
    pub UserInfo {}

    #[async_trait]
    impl UserInfoPort for UserInfo {
        async fn fetch_user_info(&self, token: &str) -> Result<Value>;
    }
}

/// Bookmark tree fake: root "0" with "Bookmarks Bar" (1) and "Other Bookmarks" (2).
pub struct FakeBookmarks {
    pub tree: Mutex<Vec<BookmarkNode>>,
    pub created: Mutex<Vec<NewBookmark>>,
}

impl FakeBookmarks {
    pub fn standard() -> Self {
        let folder = |id: &str, title: &str, parent: Option<&str>| BookmarkNode {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            parent_id: parent.map(str::to_string),
            index: None,
            date_added: None,
            children: Some(Vec::new()),
        };
        let mut root = folder("0", "", None);
        root.children = Some(vec![
            folder("1", "Bookmarks Bar", Some("0")),
            folder("2", "Other Bookmarks", Some("0")),
        ]);
        Self {
            tree: Mutex::new(vec![root]),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<NewBookmark> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookmarksPort for FakeBookmarks {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>> {
        Ok(self.tree.lock().unwrap().clone())
    }

    async fn create(&self, bookmark: NewBookmark) -> Result<BookmarkNode> {
        let mut created = self.created.lock().unwrap();
        created.push(bookmark.clone());
        Ok(BookmarkNode {
            id: format!("new-{}", created.len()),
            title: bookmark.title,
            url: bookmark.url,
            parent_id: bookmark.parent_id,
            index: bookmark.index,
            date_added: None,
            children: None,
        })
    }
}

/// In-memory page with a single focused element.
pub struct FakePage {
    pub href: String,
    pub focused: Mutex<Option<ActiveElement>>,
    pub committed: Mutex<Vec<Vec<DomEvent>>>,
    pub overlay: Mutex<Option<String>>,
    pub detached: AtomicBool,
}

impl FakePage {
    pub fn focused_on(element: Option<ActiveElement>) -> Arc<Self> {
        Arc::new(Self {
            href: "https://example.com/form".to_string(),
            focused: Mutex::new(element),
            committed: Mutex::new(Vec::new()),
            overlay: Mutex::new(None),
            detached: AtomicBool::new(false),
        })
    }

    pub fn element(&self) -> Option<ActiveElement> {
        self.focused.lock().unwrap().clone()
    }

    pub fn overlay_markup(&self) -> Option<String> {
        self.overlay.lock().unwrap().clone()
    }
}

impl PageDocumentPort for FakePage {
    fn location_href(&self) -> String {
        self.href.clone()
    }

    fn active_element(&self) -> Option<ActiveElement> {
        self.element()
    }

    fn commit_element(&self, element: &ActiveElement, events: &[DomEvent]) -> Result<(), DomError> {
        if self.detached.load(Ordering::SeqCst) {
            return Err(DomError::Detached);
        }
        *self.focused.lock().unwrap() = Some(element.clone());
        self.committed.lock().unwrap().push(events.to_vec());
        Ok(())
    }

    fn show_overlay(&self, markup: &str) -> Result<(), DomError> {
        *self.overlay.lock().unwrap() = Some(markup.to_string());
        Ok(())
    }

    fn remove_overlay(&self) {
        *self.overlay.lock().unwrap() = None;
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<RuntimeMessage>>,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<RuntimeMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl RuntimeMessengerPort for RecordingMessenger {
    async fn send_to_background(&self, message: &RuntimeMessage) -> Result<MessageResponse> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(MessageResponse::ok())
    }
}
