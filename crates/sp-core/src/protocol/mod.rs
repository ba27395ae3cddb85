//! Runtime message protocol shared by the background coordinator, content
//! scripts and UI surfaces.

pub mod command;
pub mod error;
pub mod message;
pub mod reply;
pub mod response;

pub use command::ShortcutCommand;
pub use error::ProtocolError;
pub use message::RuntimeMessage;
pub use reply::{Reply, Responder};
pub use response::MessageResponse;
