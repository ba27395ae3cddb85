//! Page document model: the focused element snapshot, paste planning and
//! markup escaping used by the content runtime.

mod element;
mod error;
mod escape;
mod event;
mod info;
mod paste;

pub use element::{
    ActiveElement, DomEvent, DomEventKind, ElementKind, RichTextEditor, TextControl, TextRange,
};
pub use error::DomError;
pub use escape::escape_html;
pub use event::PageEvent;
pub use info::ActiveElementInfo;
pub use paste::{plan_paste, PastePlan};
