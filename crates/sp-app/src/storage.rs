//! Typed JSON access over [`KeyValueStorePort`].

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sp_core::ports::KeyValueStorePort;
use tracing::warn;

/// Serde wrapper around the raw key-value port.
///
/// Collections are decoded element by element so a single malformed entry
/// does not hide the rest of the collection.
#[derive(Clone)]
pub struct TypedStore {
    kv: Arc<dyn KeyValueStorePort>,
}

impl TypedStore {
    pub fn new(kv: Arc<dyn KeyValueStorePort>) -> Self {
        Self { kv }
    }

    /// Read a single value; missing or malformed values yield `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = self
            .kv
            .get(key)
            .await
            .with_context(|| format!("read `{key}` from storage failed"))?;
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match serde_json::from_value(value) {
                Ok(decoded) => Ok(Some(decoded)),
                Err(e) => {
                    warn!(key, error = %e, "stored value has an unexpected shape, ignoring it");
                    Ok(None)
                }
            },
        }
    }

    /// Read a collection stored as a JSON array.
    pub async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = self
            .kv
            .get(key)
            .await
            .with_context(|| format!("read `{key}` from storage failed"))?;
        let items = match raw {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(_) => {
                warn!(key, "stored collection is not an array, treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(value) => decoded.push(value),
                Err(e) => warn!(key, index, error = %e, "skipping malformed stored entry"),
            }
        }
        Ok(decoded)
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("serialize `{key}` failed"))?;
        self.kv
            .set(key, value)
            .await
            .with_context(|| format!("write `{key}` to storage failed"))
    }
}
