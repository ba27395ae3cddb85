use anyhow::Result;
use async_trait::async_trait;

use crate::tabs::TabId;

#[async_trait]
pub trait ScriptingPort: Send + Sync {
    /// Execute the content script bundle inside `tab`.
    async fn inject_content_script(&self, tab: TabId) -> Result<()>;
}
