use async_trait::async_trait;
use serde_json::Value;

use crate::page::PageEvent;
use crate::protocol::MessageResponse;

/// A content script instance living inside one tab.
#[async_trait]
pub trait ContentScriptPort: Send + Sync {
    /// Handle a runtime message. Always produces a reply.
    async fn on_message(&self, message: Value) -> MessageResponse;

    /// Handle a user interaction with page UI owned by the script.
    async fn on_page_event(&self, event: PageEvent);
}
