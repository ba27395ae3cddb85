use std::sync::{Mutex, PoisonError};

use anyhow::{bail, Result};
use async_trait::async_trait;
use sp_core::ports::IdentityPort;
use tracing::{debug, info};

/// Token cache backed by a token granted out of band (config or env).
///
/// Non-interactive requests only return a cached token; an interactive
/// request "grants" the configured token and caches it.
pub struct LocalIdentityProvider {
    granted: Option<String>,
    cached: Mutex<Option<String>>,
}

impl LocalIdentityProvider {
    pub fn new(granted: Option<String>) -> Self {
        Self {
            granted,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityPort for LocalIdentityProvider {
    async fn get_auth_token(&self, interactive: bool) -> Result<String> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }
        if !interactive {
            bail!("OAuth2 not granted or revoked.");
        }
        let Some(token) = self.granted.clone() else {
            bail!("The user did not approve access.");
        };
        info!("auth token granted");
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn remove_cached_token(&self, token: &str) -> Result<()> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if cached.as_deref() == Some(token) {
            *cached = None;
            debug!("cached auth token removed");
        }
        Ok(())
    }

    async fn clear_all_cached_tokens(&self) -> Result<()> {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn silent_request_fails_until_granted() {
        let identity = LocalIdentityProvider::new(Some("tok".into()));

        let err = identity.get_auth_token(false).await.unwrap_err();
        assert_eq!(err.to_string(), "OAuth2 not granted or revoked.");

        assert_eq!(identity.get_auth_token(true).await.unwrap(), "tok");
        assert_eq!(identity.get_auth_token(false).await.unwrap(), "tok");
    }

    #[tokio::test]
    async fn removing_the_cached_token_revokes_silent_access() {
        let identity = LocalIdentityProvider::new(Some("tok".into()));
        identity.get_auth_token(true).await.unwrap();

        identity.remove_cached_token("other").await.unwrap();
        assert!(identity.get_auth_token(false).await.is_ok());

        identity.remove_cached_token("tok").await.unwrap();
        assert!(identity.get_auth_token(false).await.is_err());
    }

    #[tokio::test]
    async fn interactive_without_grant_is_refused() {
        let identity = LocalIdentityProvider::new(None);

        assert!(identity.get_auth_token(true).await.is_err());
    }
}
