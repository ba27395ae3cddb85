use anyhow::Result;
use async_trait::async_trait;
use sp_core::ports::NotificationPort;
use sp_core::{Notification, NotificationKind};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Logs notifications and optionally forwards them to a sink (the terminal
/// bridge prints them).
#[derive(Default)]
pub struct TracingNotifier {
    sink: Option<mpsc::UnboundedSender<Notification>>,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sink: Some(sink) }
    }
}

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        match notification.kind {
            NotificationKind::Error => {
                error!(title = %notification.title, message = %notification.message, "notification")
            }
            NotificationKind::Success | NotificationKind::Info => {
                info!(title = %notification.title, message = %notification.message, "notification")
            }
        }
        if let Some(sink) = &self.sink {
            sink.send(notification)
                .map_err(|_| anyhow::anyhow!("notification sink closed"))?;
        }
        Ok(())
    }
}
