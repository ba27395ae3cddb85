use std::sync::Arc;

use anyhow::Context;
use sp_app::task::spawn_logged;
use sp_app::BackgroundCoordinator;
use sp_core::AppConfig;
use sp_platform::HostEventReceiver;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::oneshot;
use tracing::{debug, info};

use super::wiring::wire_host;
use crate::bridge::run_bridge;

/// Background event loop: every subscribed host event is handled on its own
/// task, so a slow paste never blocks message replies.
///
/// Returns when the event channel closes or `shutdown` fires.
pub async fn run_event_loop(
    coordinator: Arc<BackgroundCoordinator>,
    mut events: HostEventReceiver,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(subscriptions = coordinator.subscriptions().len(), "background event loop started");
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                let kind = event.kind();
                if !coordinator.is_subscribed(kind) {
                    debug!(?kind, "dropping unsubscribed host event");
                    continue;
                }
                let coordinator = coordinator.clone();
                spawn_logged("host_event", async move { coordinator.handle_event(event).await });
            }
            _ = &mut shutdown => {
                info!("background event loop shutting down");
                break;
            }
        }
    }
    info!("background event loop stopped");
}

/// Wire the host, start the event loop and serve the bridge until `input`
/// is exhausted.
pub async fn run_host<R, W>(config: AppConfig, input: R, output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (runtime, channels) = wire_host(config)?;
    let (stop, shutdown) = oneshot::channel();
    let event_loop = tokio::spawn(run_event_loop(
        runtime.coordinator.clone(),
        channels.events,
        shutdown,
    ));

    let served = run_bridge(&runtime, channels.notifications, input, output).await;

    let _ = stop.send(());
    event_loop.await.context("background event loop panicked")?;
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::{HostEvent, Reply};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn answers_messages_until_shutdown() {
        let (runtime, channels) = wire_host(AppConfig::default()).unwrap();
        let (stop, shutdown) = oneshot::channel();
        let event_loop = tokio::spawn(run_event_loop(
            runtime.coordinator.clone(),
            channels.events,
            shutdown,
        ));

        let (responder, reply) = Reply::deferred();
        runtime
            .events
            .send(HostEvent::Message {
                message: serde_json::json!({"action": "ping"}),
                responder,
            })
            .await
            .unwrap();
        assert!(reply.into_response().await.success);

        stop.send(()).unwrap();
        timeout(Duration::from_secs(1), event_loop)
            .await
            .expect("event loop did not stop")
            .unwrap();
    }
}
