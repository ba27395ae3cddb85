//! Dependency grouping for the two runtime roles.
//!
//! Plain parameter structs: every port is required and nothing is built
//! here. The bootstrap layer fills them in.

use std::sync::Arc;

use sp_core::ports::*;
use sp_core::AppConfig;

/// Ports used by the background coordinator.
pub struct BackgroundDeps {
    // Storage
    pub storage: Arc<dyn KeyValueStorePort>,

    // Browser surfaces
    pub tabs: Arc<dyn TabControllerPort>,
    pub scripting: Arc<dyn ScriptingPort>,
    pub notifications: Arc<dyn NotificationPort>,
    pub bookmarks: Arc<dyn BookmarksPort>,

    // Identity
    pub identity: Arc<dyn IdentityPort>,
    pub user_info: Arc<dyn UserInfoPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
    pub config: AppConfig,
}

/// Ports used by one content script instance.
pub struct ContentDeps {
    pub storage: Arc<dyn KeyValueStorePort>,
    pub page: Arc<dyn PageDocumentPort>,
    pub messenger: Arc<dyn RuntimeMessengerPort>,
    pub clock: Arc<dyn ClockPort>,
    pub config: AppConfig,
}
