//! Content script runtime: one instance per tab.

mod overlay;
mod paste;
mod runtime;

pub use overlay::OverlayHandler;
pub use paste::{PasteHandler, PasteOrigin};
pub use runtime::ContentRuntime;
