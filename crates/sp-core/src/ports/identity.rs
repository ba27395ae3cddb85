use anyhow::Result;
use async_trait::async_trait;

/// OAuth token provider owned by the host.
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Obtain an access token, prompting the user when `interactive` is set.
    async fn get_auth_token(&self, interactive: bool) -> Result<String>;
    async fn remove_cached_token(&self, token: &str) -> Result<()>;
    async fn clear_all_cached_tokens(&self) -> Result<()>;
}
