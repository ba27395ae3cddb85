use anyhow::Result;
use sp_core::storage_keys;
use sp_core::UiPanel;

use crate::storage::TypedStore;

/// Last active extension-page panel.
pub struct UiStateStore {
    store: TypedStore,
}

impl UiStateStore {
    pub fn new(store: TypedStore) -> Self {
        Self { store }
    }

    /// Stored panel; missing or unknown values fall back to the dashboard.
    pub async fn active_panel(&self) -> Result<UiPanel> {
        Ok(self
            .store
            .load::<UiPanel>(storage_keys::ACTIVE_UI_PANEL)
            .await?
            .unwrap_or_default())
    }

    pub async fn set_active_panel(&self, panel: UiPanel) -> Result<()> {
        self.store.save(storage_keys::ACTIVE_UI_PANEL, &panel).await
    }

    /// Switch panels from a digit hotkey; other digits are ignored.
    pub async fn select_by_digit(&self, digit: u8) -> Result<Option<UiPanel>> {
        let Some(panel) = UiPanel::from_digit(digit) else {
            return Ok(None);
        };
        self.set_active_panel(panel).await?;
        Ok(Some(panel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sp_core::ports::KeyValueStorePort;
    use sp_infra::InMemoryKeyValueStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn defaults_to_dashboard() {
        let ui = UiStateStore::new(crate::test_support::memory_store());
        assert_eq!(ui.active_panel().await.unwrap(), UiPanel::Dashboard);
    }

    #[tokio::test]
    async fn unknown_stored_value_falls_back() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set(storage_keys::ACTIVE_UI_PANEL, json!("settings")).await.unwrap();
        let ui = UiStateStore::new(TypedStore::new(kv));

        assert_eq!(ui.active_panel().await.unwrap(), UiPanel::Dashboard);
    }

    #[tokio::test]
    async fn digit_hotkeys_persist_panel() {
        let ui = UiStateStore::new(crate::test_support::memory_store());

        assert_eq!(ui.select_by_digit(4).await.unwrap(), Some(UiPanel::HabitManager));
        assert_eq!(ui.select_by_digit(0).await.unwrap(), None);
        assert_eq!(ui.active_panel().await.unwrap(), UiPanel::HabitManager);
    }
}
