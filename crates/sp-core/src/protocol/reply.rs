//! Reply handles for inbound runtime messages.
//!
//! Every message handler must either answer immediately or hand back a
//! deferred reply whose [`Responder`] is completed later. A responder that is
//! dropped without answering resolves as a failure instead of leaving the
//! sender waiting forever.

use tokio::sync::oneshot;

use super::response::MessageResponse;

pub const PORT_CLOSED_ERROR: &str =
    "The message port closed before a response was received.";

#[must_use = "a reply must be delivered to the message sender"]
#[derive(Debug)]
pub enum Reply {
    Immediate(MessageResponse),
    Deferred(oneshot::Receiver<MessageResponse>),
}

/// Completion side of a deferred reply.
#[derive(Debug)]
pub struct Responder(oneshot::Sender<MessageResponse>);

impl Reply {
    /// Open a deferred reply.
    pub fn deferred() -> (Responder, Reply) {
        let (tx, rx) = oneshot::channel();
        (Responder(tx), Reply::Deferred(rx))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Reply::Deferred(_))
    }

    /// Wait for the final response.
    pub async fn into_response(self) -> MessageResponse {
        match self {
            Reply::Immediate(response) => response,
            Reply::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| MessageResponse::failure(PORT_CLOSED_ERROR)),
        }
    }
}

impl From<MessageResponse> for Reply {
    fn from(response: MessageResponse) -> Self {
        Reply::Immediate(response)
    }
}

impl Responder {
    /// Deliver the response. A sender that stopped listening is ignored.
    pub fn send(self, response: MessageResponse) {
        let _ = self.0.send(response);
    }

    /// Build a responder wired straight to a oneshot sender.
    pub fn from_sender(tx: oneshot::Sender<MessageResponse>) -> Self {
        Self(tx)
    }
}
