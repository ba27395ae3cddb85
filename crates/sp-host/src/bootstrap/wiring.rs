//! Dependency wiring: build every adapter, group them into the deps
//! structs and hand back the running pieces.

use std::sync::Arc;

use sp_app::{BackgroundCoordinator, BackgroundDeps, ContentDeps, ContentRuntime};
use sp_core::ports::{ClockPort, ContentScriptPort, KeyValueStorePort};
use sp_core::tabs::TabId;
use sp_core::{AppConfig, Notification};
use sp_infra::{FallbackKeyValueStore, FileKeyValueStore, SystemClock};
use sp_platform::{
    host_channel, ChannelRuntimeMessenger, ContentScriptFactory, GoogleUserInfoClient,
    HostEventReceiver, HostEventSender, InMemoryBookmarks, InMemoryPage, LocalIdentityProvider,
    SimulatedBrowser, TracingNotifier,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Builds a [`ContentRuntime`] for every tab the browser injects into.
struct ContentRuntimeFactory {
    storage: Arc<dyn KeyValueStorePort>,
    messenger: ChannelRuntimeMessenger,
    clock: Arc<dyn ClockPort>,
    config: AppConfig,
}

impl ContentScriptFactory for ContentRuntimeFactory {
    fn create(&self, tab: TabId, page: Arc<InMemoryPage>) -> Arc<dyn ContentScriptPort> {
        debug!(tab, "starting content runtime");
        Arc::new(ContentRuntime::new(ContentDeps {
            storage: self.storage.clone(),
            page,
            messenger: Arc::new(self.messenger.clone()),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }))
    }
}

/// Long-lived handles of a wired host.
pub struct HostRuntime {
    pub coordinator: Arc<BackgroundCoordinator>,
    pub browser: Arc<SimulatedBrowser>,
    pub storage: Arc<dyn KeyValueStorePort>,
    pub events: HostEventSender,
}

/// Receiving ends owned by the event loop and the bridge.
pub struct HostChannels {
    pub events: HostEventReceiver,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

fn create_storage(config: &AppConfig) -> Arc<dyn KeyValueStorePort> {
    let primary = config.storage.data_file.as_ref().map(|path| {
        info!(path = %path.display(), "using file-backed store");
        Arc::new(FileKeyValueStore::new(path.clone())) as Arc<dyn KeyValueStorePort>
    });
    Arc::new(FallbackKeyValueStore::new(primary))
}

pub fn wire_host(config: AppConfig) -> WiringResult<(HostRuntime, HostChannels)> {
    let (events_tx, events_rx) = host_channel();
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();

    let storage = create_storage(&config);
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let factory = Arc::new(ContentRuntimeFactory {
        storage: storage.clone(),
        messenger: ChannelRuntimeMessenger::new(events_tx.clone()),
        clock: clock.clone(),
        config: config.clone(),
    });
    let browser = Arc::new(SimulatedBrowser::new(factory));

    let user_info = GoogleUserInfoClient::new(config.oauth.userinfo_endpoint.clone())
        .map_err(|e| WiringError::HttpClientInit(format!("{e:#}")))?;

    let deps = BackgroundDeps {
        storage: storage.clone(),
        tabs: browser.clone(),
        scripting: browser.clone(),
        notifications: Arc::new(TracingNotifier::with_sink(notify_tx)),
        bookmarks: Arc::new(InMemoryBookmarks::new(Some(events_tx.clone()))),
        identity: Arc::new(LocalIdentityProvider::new(config.oauth.token.clone())),
        user_info: Arc::new(user_info),
        clock,
        config,
    };

    let runtime = HostRuntime {
        coordinator: Arc::new(BackgroundCoordinator::new(deps)),
        browser,
        storage,
        events: events_tx,
    };
    let channels = HostChannels {
        events: events_rx,
        notifications: notify_rx,
    };
    Ok((runtime, channels))
}
