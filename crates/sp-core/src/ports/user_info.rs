use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait UserInfoPort: Send + Sync {
    /// Profile of the account owning `token`.
    async fn fetch_user_info(&self, token: &str) -> Result<Value>;
}
