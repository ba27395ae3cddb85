use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sp_core::ports::{KeyValueStorePort, StorageError};
use tracing::warn;

use super::memory::InMemoryKeyValueStore;

/// Store that prefers the host store and degrades to memory.
///
/// Once the primary reports [`StorageError::Unavailable`] (or none was
/// provided) every later call is served by the in-memory substitute.
/// Backend errors from a reachable primary are passed through unchanged.
pub struct FallbackKeyValueStore {
    primary: Option<Arc<dyn KeyValueStorePort>>,
    substitute: InMemoryKeyValueStore,
    degraded: AtomicBool,
}

impl FallbackKeyValueStore {
    pub fn new(primary: Option<Arc<dyn KeyValueStorePort>>) -> Self {
        let degraded = primary.is_none();
        if degraded {
            warn!("host storage not available, using in-memory store");
        }
        Self {
            primary,
            substitute: InMemoryKeyValueStore::new(),
            degraded: AtomicBool::new(degraded),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    fn active_primary(&self) -> Option<&Arc<dyn KeyValueStorePort>> {
        if self.is_degraded() {
            None
        } else {
            self.primary.as_ref()
        }
    }

    fn degrade(&self, reason: &str) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            warn!(reason, "host storage became unavailable, switching to in-memory store");
        }
    }
}

#[async_trait]
impl KeyValueStorePort for FallbackKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.get(key).await {
                Err(StorageError::Unavailable(reason)) => self.degrade(&reason),
                other => return other,
            }
        }
        self.substitute.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.set(key, value.clone()).await {
                Err(StorageError::Unavailable(reason)) => self.degrade(&reason),
                other => return other,
            }
        }
        self.substitute.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if let Some(primary) = self.active_primary() {
            match primary.remove(key).await {
                Err(StorageError::Unavailable(reason)) => self.degrade(&reason),
                other => return other,
            }
        }
        self.substitute.remove(key).await
    }
}
