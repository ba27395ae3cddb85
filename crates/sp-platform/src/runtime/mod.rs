mod event_bus;

pub use event_bus::{host_channel, HostEventReceiver, HostEventSender, HOST_EVENT_BUFFER};
