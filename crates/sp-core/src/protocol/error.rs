use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("message has no action")]
    MissingAction,

    #[error("Unknown action")]
    UnknownAction(String),

    #[error("invalid payload for action '{action}': {reason}")]
    InvalidPayload { action: String, reason: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
