//! In-page snippet selection overlay.
//!
//! The overlay is a pure state machine: the content runtime feeds it page
//! events and executes the returned [`OverlayAction`]s against the page.

mod render;
mod state_machine;

pub use render::{render_overlay, OverlayRow, OverlayView, EMPTY_PLACEHOLDER, OVERLAY_CLASS};
pub use state_machine::{
    OverlayAction, OverlayEvent, OverlayKey, OverlaySession, OverlayState, OverlayStateMachine,
};
