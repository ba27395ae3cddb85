//! Reaching the content script of a tab: support check, liveness ping,
//! on-demand injection and retried delivery.

use std::sync::Arc;
use std::time::Duration;

use sp_core::config::MessagingConfig;
use sp_core::ports::{ScriptingPort, TabControllerPort};
use sp_core::protocol::{MessageResponse, RuntimeMessage};
use sp_core::tabs::{is_url_supported, TabId, TabInfo};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::error::MessagingError;

pub struct ContentScriptManager {
    tabs: Arc<dyn TabControllerPort>,
    scripting: Arc<dyn ScriptingPort>,
    config: MessagingConfig,
    extra_restricted: Vec<String>,
}

impl ContentScriptManager {
    pub fn new(
        tabs: Arc<dyn TabControllerPort>,
        scripting: Arc<dyn ScriptingPort>,
        config: MessagingConfig,
        extra_restricted: Vec<String>,
    ) -> Self {
        Self {
            tabs,
            scripting,
            config,
            extra_restricted,
        }
    }

    pub async fn active_tab(&self) -> Result<TabInfo, MessagingError> {
        self.tabs
            .active_tab()
            .await
            .map_err(|e| MessagingError::Host(e.to_string()))?
            .ok_or(MessagingError::NoActiveTab)
    }

    pub async fn all_tabs(&self) -> Result<Vec<TabInfo>, MessagingError> {
        self.tabs
            .all_tabs()
            .await
            .map_err(|e| MessagingError::Host(e.to_string()))
    }

    pub fn ensure_supported(&self, tab: &TabInfo) -> Result<(), MessagingError> {
        if is_url_supported(tab.url.as_deref(), &self.extra_restricted) {
            Ok(())
        } else {
            Err(MessagingError::UnsupportedTab {
                url: tab.url.clone().unwrap_or_default(),
            })
        }
    }

    /// Active tab that passed the support check.
    pub async fn supported_active_tab(&self) -> Result<TabInfo, MessagingError> {
        let tab = self.active_tab().await?;
        self.ensure_supported(&tab)?;
        Ok(tab)
    }

    /// Whether a content script answers `ping` affirmatively within the timeout.
    pub async fn is_injected(&self, tab: TabId) -> bool {
        let ping = RuntimeMessage::Ping;
        let limit = Duration::from_millis(self.config.ping_timeout_ms);
        match timeout(limit, self.tabs.send_message(tab, &ping)).await {
            Ok(Ok(response)) => response.success,
            Ok(Err(e)) => {
                debug!(tab, error = %e, "ping failed");
                false
            }
            Err(_) => {
                debug!(tab, "ping timed out");
                false
            }
        }
    }

    /// Inject the content script unless one already answers in `tab`.
    pub async fn ensure_injected(&self, tab: TabId) -> Result<(), MessagingError> {
        if self.is_injected(tab).await {
            return Ok(());
        }

        info!(tab, "injecting content script");
        self.scripting
            .inject_content_script(tab)
            .await
            .map_err(|e| MessagingError::Injection(e.to_string()))?;
        sleep(Duration::from_millis(self.config.injection_settle_ms)).await;
        Ok(())
    }

    /// Send once, injecting first if needed.
    pub async fn send(&self, tab: TabId, message: &RuntimeMessage) -> Result<MessageResponse, MessagingError> {
        self.ensure_injected(tab).await?;
        self.tabs
            .send_message(tab, message)
            .await
            .map_err(|e| MessagingError::Delivery(e.to_string()))
    }

    /// Send with up to `retry_attempts` attempts and a fixed delay between them.
    ///
    /// A delivered reply ends the loop even when it reports `success: false`.
    pub async fn send_with_retry(
        &self,
        tab: TabId,
        message: &RuntimeMessage,
    ) -> Result<MessageResponse, MessagingError> {
        let attempts = self.config.retry_attempts.max(1);
        let mut last_error = MessagingError::Delivery("message was not sent".to_string());

        for attempt in 1..=attempts {
            match self.send(tab, message).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        tab,
                        action = message.action(),
                        attempt,
                        attempts,
                        error = %e,
                        "content script message failed"
                    );
                    last_error = e;
                }
            }
            if attempt < attempts {
                sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }
        }

        Err(last_error)
    }

    /// Send to every tab, ignoring per-tab failures. Returns the delivered count.
    pub async fn broadcast(&self, message: &RuntimeMessage) -> Result<usize, MessagingError> {
        let tabs = self.all_tabs().await?;
        let sends = tabs.iter().map(|tab| self.tabs.send_message(tab.id, message));
        let delivered = futures::future::join_all(sends)
            .await
            .into_iter()
            .filter(Result::is_ok)
            .count();
        debug!(action = message.action(), tabs = tabs.len(), delivered, "broadcast sent");
        Ok(delivered)
    }
}
