use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sp_core::ports::RuntimeMessengerPort;
use sp_core::protocol::{MessageResponse, Reply, RuntimeMessage};
use sp_core::HostEvent;

use crate::runtime::HostEventSender;

/// Sends content-script messages into the background event loop and waits
/// for the coordinator's reply.
#[derive(Clone)]
pub struct ChannelRuntimeMessenger {
    events: HostEventSender,
}

impl ChannelRuntimeMessenger {
    pub fn new(events: HostEventSender) -> Self {
        Self { events }
    }
}

#[async_trait]
impl RuntimeMessengerPort for ChannelRuntimeMessenger {
    async fn send_to_background(&self, message: &RuntimeMessage) -> Result<MessageResponse> {
        let (responder, reply) = Reply::deferred();
        self.events
            .send(HostEvent::Message {
                message: message.to_value(),
                responder,
            })
            .await
            .map_err(|_| anyhow!("Extension context invalidated."))?;
        Ok(reply.into_response().await)
    }
}
