use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sp_core::ports::UserInfoPort;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the signed-in account profile from the OAuth userinfo endpoint.
pub struct GoogleUserInfoClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleUserInfoClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build userinfo http client failed")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl UserInfoPort for GoogleUserInfoClient {
    async fn fetch_user_info(&self, token: &str) -> Result<Value> {
        let response = self
            .http
            .get(&self.endpoint)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("userinfo request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            ));
        }
        debug!(status = status.as_u16(), "userinfo fetched");

        response
            .json::<Value>()
            .await
            .context("userinfo response is not JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_profile_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/oauth2/v2/userinfo")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"email":"dev@example.com","name":"Dev"}"#)
            .create_async()
            .await;
        let client = GoogleUserInfoClient::new(format!("{}/oauth2/v2/userinfo", server.url())).unwrap();

        let info = client.fetch_user_info("tok-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(info, json!({"email": "dev@example.com", "name": "Dev"}));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/userinfo")
            .with_status(401)
            .create_async()
            .await;
        let client = GoogleUserInfoClient::new(format!("{}/userinfo", server.url())).unwrap();

        let err = client.fetch_user_info("expired").await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 401: Unauthorized");
    }
}
