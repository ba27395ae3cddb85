use anyhow::Result;
use async_trait::async_trait;

use crate::protocol::{MessageResponse, RuntimeMessage};
use crate::tabs::{TabId, TabInfo};

#[async_trait]
pub trait TabControllerPort: Send + Sync {
    /// Active tab of the focused window, if any.
    async fn active_tab(&self) -> Result<Option<TabInfo>>;

    async fn all_tabs(&self) -> Result<Vec<TabInfo>>;

    /// Deliver `message` to the content script in `tab` and wait for its reply.
    ///
    /// Fails when no content script is listening in the tab.
    async fn send_message(&self, tab: TabId, message: &RuntimeMessage) -> Result<MessageResponse>;
}
