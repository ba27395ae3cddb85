use sp_core::HostEvent;
use tokio::sync::mpsc;

pub const HOST_EVENT_BUFFER: usize = 64;

pub type HostEventSender = mpsc::Sender<HostEvent>;
pub type HostEventReceiver = mpsc::Receiver<HostEvent>;

/// Channel carrying host events into the background event loop.
pub fn host_channel() -> (HostEventSender, HostEventReceiver) {
    mpsc::channel(HOST_EVENT_BUFFER)
}
