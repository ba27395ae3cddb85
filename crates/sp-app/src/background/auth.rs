use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use sp_core::ports::{IdentityPort, UserInfoPort};
use tracing::debug;

/// OAuth helpers exposed to the extension pages.
pub struct AuthBridge {
    identity: Arc<dyn IdentityPort>,
    user_info: Arc<dyn UserInfoPort>,
}

impl AuthBridge {
    pub fn new(identity: Arc<dyn IdentityPort>, user_info: Arc<dyn UserInfoPort>) -> Self {
        Self {
            identity,
            user_info,
        }
    }

    pub async fn get_auth_token(&self, interactive: bool) -> Result<String> {
        debug!(interactive, "requesting auth token");
        self.identity.get_auth_token(interactive).await
    }

    pub async fn remove_auth_token(&self, token: &str) -> Result<()> {
        self.identity.remove_cached_token(token).await
    }

    pub async fn clear_all_tokens(&self) -> Result<()> {
        self.identity.clear_all_cached_tokens().await
    }

    pub async fn user_info(&self, token: &str) -> Result<Value> {
        self.user_info.fetch_user_info(token).await
    }
}
