//! Spawned-task helpers.

use std::future::Future;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::error;

/// Spawn `fut`, logging an error result or a panic instead of dropping it.
pub fn spawn_logged<F>(name: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(task = name, error = %format!("{e:#}"), "background task failed"),
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(task = name, reason = %reason, "background task panicked");
            }
        }
    })
}
