use anyhow::Result;
use async_trait::async_trait;

use crate::notification::Notification;

#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;
}
