use anyhow::Result;
use async_trait::async_trait;

use crate::protocol::{MessageResponse, RuntimeMessage};

/// Content-script side channel to the background coordinator.
#[async_trait]
pub trait RuntimeMessengerPort: Send + Sync {
    async fn send_to_background(&self, message: &RuntimeMessage) -> Result<MessageResponse>;
}
