//! JSON-lines bridge: one host event per input line, replies and
//! notifications as output lines.
//!
//! Besides the browser lifecycle events the bridge accepts a few driver
//! events (`openTab`, `activateTab`, `focus`, `page`, `inspect`) that stand
//! in for the user clicking around in the simulated browser.
//!
//! Runtime messages travel through the background event loop like any
//! content-script message. Lifecycle events and commands are handed to the
//! coordinator directly so their notifications are flushed before the
//! bridge exits. `inspect` first waits for every in-flight command, event
//! and reply, so it observes their effects on the page.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sp_core::page::{ActiveElement, PageEvent};
use sp_core::protocol::{MessageResponse, Reply};
use sp_core::tabs::TabId;
use sp_core::{BookmarkChangeKind, HostEvent, Notification};
use sp_app::BackgroundCoordinator;
use sp_platform::{HostEventSender, InMemoryPage, SimulatedBrowser};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::bootstrap::HostRuntime;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BridgeInput {
    Installed,
    Startup,
    BookmarkChanged { kind: BookmarkChangeKind },
    Command { name: String },
    Message { id: u64, message: Value },
    OpenTab { url: String },
    ActivateTab { tab: TabId },
    /// Focus an element in the tab's page; `null` blurs.
    Focus { tab: TabId, element: Option<ActiveElement> },
    /// User interaction with script-owned page UI (the overlay).
    Page { tab: TabId, input: PageEvent },
    Inspect { tab: TabId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub focused: Option<ActiveElement>,
    pub overlay: Option<String>,
    pub injections: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeOutput {
    Response { id: u64, response: MessageResponse },
    Notification { notification: Notification },
    TabOpened { tab: TabId, url: String },
    Page { tab: TabId, page: PageSnapshot },
    Error { error: String },
}

struct Bridge {
    coordinator: Arc<BackgroundCoordinator>,
    browser: Arc<SimulatedBrowser>,
    events: HostEventSender,
    out: mpsc::UnboundedSender<BridgeOutput>,
    pending: JoinSet<()>,
}

impl Bridge {
    fn emit(&self, output: BridgeOutput) {
        if self.out.send(output).is_err() {
            warn!("bridge output closed");
        }
    }

    async fn handle_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let result = match serde_json::from_str::<BridgeInput>(line) {
            Ok(input) => self.handle(input).await,
            Err(e) => Err(anyhow!("invalid bridge input: {e}")),
        };
        if let Err(e) = result {
            self.emit(BridgeOutput::Error {
                error: format!("{e:#}"),
            });
        }
    }

    async fn handle(&mut self, input: BridgeInput) -> Result<()> {
        debug!(?input, "bridge input");
        match input {
            BridgeInput::Installed => self.run(HostEvent::Installed),
            BridgeInput::Startup => self.run(HostEvent::Startup),
            BridgeInput::BookmarkChanged { kind } => self.run(HostEvent::BookmarkChanged(kind)),
            BridgeInput::Command { name } => self.run(HostEvent::Command(name)),
            BridgeInput::Message { id, message } => {
                let (responder, reply) = Reply::deferred();
                self.events
                    .send(HostEvent::Message { message, responder })
                    .await
                    .map_err(|_| anyhow!("background event loop stopped"))?;
                let out = self.out.clone();
                self.pending.spawn(async move {
                    let response = reply.into_response().await;
                    let _ = out.send(BridgeOutput::Response { id, response });
                });
                Ok(())
            }
            BridgeInput::OpenTab { url } => {
                let tab = self.browser.open_tab(&url);
                self.emit(BridgeOutput::TabOpened { tab, url });
                Ok(())
            }
            BridgeInput::ActivateTab { tab } => Ok(self.browser.activate(tab)?),
            BridgeInput::Focus { tab, element } => {
                let page = self.page(tab)?;
                match element {
                    Some(element) => page.focus(element),
                    None => page.blur(),
                }
                Ok(())
            }
            BridgeInput::Page { tab, input } => Ok(self.browser.page_event(tab, input).await?),
            BridgeInput::Inspect { tab } => {
                self.settle().await;
                let page = self.page(tab)?;
                self.emit(BridgeOutput::Page {
                    tab,
                    page: PageSnapshot {
                        focused: page.focused(),
                        overlay: page.overlay_markup(),
                        injections: self.browser.injections(tab),
                    },
                });
                Ok(())
            }
        }
    }

    fn run(&mut self, event: HostEvent) -> Result<()> {
        let kind = event.kind();
        if !self.coordinator.is_subscribed(kind) {
            debug!(?kind, "ignoring unsubscribed host event");
            return Ok(());
        }
        let coordinator = self.coordinator.clone();
        let out = self.out.clone();
        self.pending.spawn(async move {
            if let Err(e) = coordinator.handle_event(event).await {
                warn!(error = %format!("{e:#}"), ?kind, "host event failed");
                let _ = out.send(BridgeOutput::Error {
                    error: format!("{e:#}"),
                });
            }
        });
        Ok(())
    }

    /// Drop finished tasks without waiting.
    fn reap(&mut self) {
        while let Some(joined) = self.pending.try_join_next() {
            log_join(joined);
        }
    }

    /// Wait for every in-flight command, lifecycle event and reply.
    async fn settle(&mut self) {
        while let Some(joined) = self.pending.join_next().await {
            log_join(joined);
        }
    }

    fn page(&self, tab: TabId) -> Result<Arc<InMemoryPage>> {
        self.browser
            .page(tab)
            .ok_or_else(|| anyhow!("No tab with id: {tab}."))
    }
}

fn log_join(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        warn!(error = %e, "bridge task did not complete");
    }
}

async fn write_outputs<W>(mut output: W, mut rx: mpsc::UnboundedReceiver<BridgeOutput>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(item) = rx.recv().await {
        let mut line = serde_json::to_string(&item).context("encode bridge output failed")?;
        line.push('\n');
        output
            .write_all(line.as_bytes())
            .await
            .context("write bridge output failed")?;
        output.flush().await.context("flush bridge output failed")?;
    }
    output.shutdown().await.context("close bridge output failed")?;
    Ok(())
}

/// Serve the bridge until `input` reaches EOF and every pending reply has
/// been written.
pub async fn run_bridge<R, W>(
    runtime: &HostRuntime,
    mut notifications: mpsc::UnboundedReceiver<Notification>,
    input: R,
    output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_outputs(output, out_rx));

    let mut bridge = Bridge {
        coordinator: runtime.coordinator.clone(),
        browser: runtime.browser.clone(),
        events: runtime.events.clone(),
        out: out_tx,
        pending: JoinSet::new(),
    };

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("read bridge input failed")? {
                    Some(line) => {
                        bridge.handle_line(&line).await;
                        bridge.reap();
                    }
                    None => break,
                }
            }
            Some(notification) = notifications.recv() => {
                bridge.emit(BridgeOutput::Notification { notification });
            }
        }
    }

    bridge.settle().await;
    while let Ok(notification) = notifications.try_recv() {
        bridge.emit(BridgeOutput::Notification { notification });
    }
    drop(bridge);

    writer.await.context("bridge writer task failed")?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{run_event_loop, wire_host};
    use serde_json::json;
    use sp_core::clipboard::NewClipboardItem;
    use sp_core::AppConfig;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    fn start() -> (HostRuntime, mpsc::UnboundedReceiver<Notification>, oneshot::Sender<()>) {
        let (runtime, channels) = wire_host(AppConfig::default()).unwrap();
        let (stop, shutdown) = oneshot::channel();
        tokio::spawn(run_event_loop(
            runtime.coordinator.clone(),
            channels.events,
            shutdown,
        ));
        (runtime, channels.notifications, stop)
    }

    async fn drive(lines: &[Value]) -> Vec<Value> {
        let (runtime, notifications, _stop) = start();
        drive_runtime(&runtime, notifications, lines).await
    }

    async fn drive_runtime(
        runtime: &HostRuntime,
        notifications: mpsc::UnboundedReceiver<Notification>,
        lines: &[Value],
    ) -> Vec<Value> {

        let mut input = String::new();
        for line in lines {
            input.push_str(&line.to_string());
            input.push('\n');
        }
        input.push_str("not json\n");

        let (writer, mut reader) = tokio::io::duplex(64 * 1024);
        run_bridge(runtime, notifications, input.as_bytes(), writer)
            .await
            .unwrap();

        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn parses_lifecycle_and_driver_events() {
        let input: BridgeInput =
            serde_json::from_value(json!({"event": "bookmarkChanged", "kind": "childrenReordered"}))
                .unwrap();
        assert_eq!(
            input,
            BridgeInput::BookmarkChanged {
                kind: BookmarkChangeKind::ChildrenReordered
            }
        );

        let input: BridgeInput = serde_json::from_value(json!({
            "event": "page",
            "tab": 1,
            "input": {"type": "keyDown", "key": "Enter"}
        }))
        .unwrap();
        assert_eq!(
            input,
            BridgeInput::Page {
                tab: 1,
                input: PageEvent::KeyDown { key: "Enter".into() }
            }
        );
    }

    #[test]
    fn outputs_are_flat_json_objects() {
        let output = BridgeOutput::Response {
            id: 7,
            response: MessageResponse::ok().with("token", "t"),
        };

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"id": 7, "response": {"success": true, "token": "t"}})
        );
    }

    #[tokio::test]
    async fn serves_messages_commands_and_driver_events() {
        let out = drive(&[
            json!({"event": "openTab", "url": "https://example.com"}),
            json!({"event": "message", "id": 1, "message": {"action": "ping"}}),
            json!({"event": "message", "id": 2, "message": {"action": "bogus"}}),
            json!({"event": "command", "name": "paste_favorite_clipboard"}),
            json!({"event": "inspect", "tab": 1}),
            json!({"event": "inspect", "tab": 99}),
        ])
        .await;

        assert!(out.contains(&json!({"tab": 1, "url": "https://example.com"})));
        assert!(out.contains(&json!({"id": 1, "response": {"success": true}})));
        assert!(out.contains(&json!({"id": 2, "response": {"success": false, "error": "Unknown action"}})));
        assert!(out.contains(&json!({
            "tab": 1,
            "page": {"focused": null, "overlay": null, "injections": 0}
        })));
        assert!(out
            .iter()
            .any(|o| o["notification"]["kind"] == "info"));
        let errors: Vec<_> = out.iter().filter_map(|o| o["error"].as_str()).collect();
        assert!(errors.iter().any(|e| e.contains("No tab with id: 99.")));
        assert!(errors.iter().any(|e| e.starts_with("invalid bridge input")));
    }

    #[tokio::test]
    async fn inspect_sees_the_effect_of_an_earlier_command() {
        let (runtime, notifications, _stop) = start();
        let mut favorite = NewClipboardItem::from_text("hello");
        favorite.is_favorite = true;
        runtime.coordinator.clipboard().add_item(favorite).await.unwrap();

        let out = drive_runtime(
            &runtime,
            notifications,
            &[
                json!({"event": "openTab", "url": "https://example.com/form"}),
                json!({
                    "event": "focus",
                    "tab": 1,
                    "element": serde_json::to_value(ActiveElement::input("")).unwrap()
                }),
                json!({"event": "command", "name": "paste_favorite_clipboard"}),
                json!({"event": "inspect", "tab": 1}),
            ],
        )
        .await;

        let page = out
            .iter()
            .find_map(|o| o.get("page"))
            .expect("inspect output");
        assert_eq!(page["focused"]["kind"]["value"], "hello");
        assert_eq!(page["injections"], 1);
    }

    #[tokio::test]
    async fn finished_replies_do_not_accumulate() {
        let (runtime, _notifications, _stop) = start();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let mut bridge = Bridge {
            coordinator: runtime.coordinator.clone(),
            browser: runtime.browser.clone(),
            events: runtime.events.clone(),
            out: out_tx,
            pending: JoinSet::new(),
        };

        for id in 0..200 {
            let line = json!({"event": "message", "id": id, "message": {"action": "ping"}});
            bridge.handle_line(&line.to_string()).await;
            bridge.reap();
        }
        for _ in 0..200 {
            let reply = out_rx.recv().await.unwrap();
            assert!(matches!(reply, BridgeOutput::Response { .. }));
        }

        timeout(Duration::from_secs(1), async {
            loop {
                bridge.reap();
                if bridge.pending.is_empty() {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("reply tasks were never reaped");
    }
}
