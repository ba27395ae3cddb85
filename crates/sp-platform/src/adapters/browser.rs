//! In-process stand-in for the browser's tabs and scripting APIs.
//!
//! Each tab owns an [`InMemoryPage`]. Content scripts only exist after
//! injection, so messages sent to a fresh tab fail the same way a real
//! browser reports a missing receiver.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use sp_core::page::PageEvent;
use sp_core::ports::{ContentScriptPort, ScriptingPort, TabControllerPort};
use sp_core::protocol::{MessageResponse, RuntimeMessage};
use sp_core::tabs::{is_url_supported, TabId, TabInfo};
use thiserror::Error;
use tracing::{debug, info};

use super::page::InMemoryPage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("No tab with id: {0}.")]
    NoTab(TabId),

    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    #[error("Cannot access contents of url \"{0}\".")]
    RestrictedUrl(String),
}

/// Builds the content script that runs in a freshly injected tab.
pub trait ContentScriptFactory: Send + Sync {
    fn create(&self, tab: TabId, page: Arc<InMemoryPage>) -> Arc<dyn ContentScriptPort>;
}

struct SimulatedTab {
    url: String,
    page: Arc<InMemoryPage>,
    script: Option<Arc<dyn ContentScriptPort>>,
    injections: usize,
}

pub struct SimulatedBrowser {
    factory: Arc<dyn ContentScriptFactory>,
    tabs: RwLock<BTreeMap<TabId, SimulatedTab>>,
    active: AtomicI64,
    next_id: AtomicI64,
    drop_next: AtomicUsize,
}

impl SimulatedBrowser {
    pub fn new(factory: Arc<dyn ContentScriptFactory>) -> Self {
        Self {
            factory,
            tabs: RwLock::new(BTreeMap::new()),
            active: AtomicI64::new(-1),
            next_id: AtomicI64::new(1),
            drop_next: AtomicUsize::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<TabId, SimulatedTab>> {
        self.tabs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<TabId, SimulatedTab>> {
        self.tabs.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a tab on `url` and make it the active one.
    pub fn open_tab(&self, url: &str) -> TabId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.write().insert(
            id,
            SimulatedTab {
                url: url.to_string(),
                page: Arc::new(InMemoryPage::new(url)),
                script: None,
                injections: 0,
            },
        );
        self.active.store(id, Ordering::SeqCst);
        info!(tab = id, url, "tab opened");
        id
    }

    pub fn activate(&self, tab: TabId) -> Result<(), BrowserError> {
        if !self.read().contains_key(&tab) {
            return Err(BrowserError::NoTab(tab));
        }
        self.active.store(tab, Ordering::SeqCst);
        Ok(())
    }

    pub fn close_tab(&self, tab: TabId) -> Result<(), BrowserError> {
        self.write().remove(&tab).ok_or(BrowserError::NoTab(tab))?;
        let _ = self
            .active
            .compare_exchange(tab, -1, Ordering::SeqCst, Ordering::SeqCst);
        Ok(())
    }

    pub fn page(&self, tab: TabId) -> Option<Arc<InMemoryPage>> {
        self.read().get(&tab).map(|t| t.page.clone())
    }

    /// How many times a content script was injected into `tab`.
    pub fn injections(&self, tab: TabId) -> usize {
        self.read().get(&tab).map_or(0, |t| t.injections)
    }

    /// Make the next `count` deliveries fail as if the receiver vanished.
    pub fn drop_next_messages(&self, count: usize) {
        self.drop_next.store(count, Ordering::SeqCst);
    }

    fn script(&self, tab: TabId) -> Result<Arc<dyn ContentScriptPort>, BrowserError> {
        let tabs = self.read();
        let entry = tabs.get(&tab).ok_or(BrowserError::NoTab(tab))?;
        entry.script.clone().ok_or(BrowserError::NoReceiver)
    }

    /// Deliver a user interaction to the content script of `tab`.
    pub async fn page_event(&self, tab: TabId, event: PageEvent) -> Result<(), BrowserError> {
        let script = self.script(tab)?;
        script.on_page_event(event).await;
        Ok(())
    }

    fn tab_info(&self, id: TabId, tab: &SimulatedTab) -> TabInfo {
        TabInfo {
            id,
            url: Some(tab.url.clone()),
            active: self.active.load(Ordering::SeqCst) == id,
        }
    }
}

#[async_trait]
impl TabControllerPort for SimulatedBrowser {
    async fn active_tab(&self) -> Result<Option<TabInfo>> {
        let active = self.active.load(Ordering::SeqCst);
        Ok(self.read().get(&active).map(|tab| self.tab_info(active, tab)))
    }

    async fn all_tabs(&self) -> Result<Vec<TabInfo>> {
        Ok(self
            .read()
            .iter()
            .map(|(id, tab)| self.tab_info(*id, tab))
            .collect())
    }

    async fn send_message(&self, tab: TabId, message: &RuntimeMessage) -> Result<MessageResponse> {
        let script = self.script(tab)?;
        let dropped = self
            .drop_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if dropped {
            debug!(tab, action = message.action(), "message dropped");
            return Err(BrowserError::NoReceiver.into());
        }
        Ok(script.on_message(message.to_value()).await)
    }
}

#[async_trait]
impl ScriptingPort for SimulatedBrowser {
    async fn inject_content_script(&self, tab: TabId) -> Result<()> {
        let mut tabs = self.write();
        let entry = tabs.get_mut(&tab).ok_or(BrowserError::NoTab(tab))?;
        if !is_url_supported(Some(&entry.url), &[]) {
            return Err(BrowserError::RestrictedUrl(entry.url.clone()).into());
        }
        entry.script = Some(self.factory.create(tab, entry.page.clone()));
        entry.injections += 1;
        debug!(tab, injections = entry.injections, "content script injected");
        Ok(())
    }
}
