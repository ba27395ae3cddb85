//! # sp-host
//!
//! Process bootstrap for ShortcutPaste: configuration loading, tracing,
//! dependency wiring, the background event loop and the JSON-lines bridge
//! that lets a terminal (or a test) play the browser.

pub mod bootstrap;
pub mod bridge;

pub use bootstrap::{
    load_or_default, run_event_loop, run_host, wire_host, HostChannels, HostRuntime,
};
pub use bridge::run_bridge;
