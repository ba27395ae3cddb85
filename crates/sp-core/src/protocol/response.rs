use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply envelope: `{ "success": bool, "error"?: string, ...payload }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: Map::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: Map::new(),
        }
    }

    /// Failure without an error message (the paste handler's plain `false`).
    pub fn unsuccessful() -> Self {
        Self {
            success: false,
            error: None,
            data: Map::new(),
        }
    }

    pub fn from_result(success: bool) -> Self {
        if success {
            Self::ok()
        } else {
            Self::unsuccessful()
        }
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
