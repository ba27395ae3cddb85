//! Configuration loading.
//!
//! Pure data loading: read the TOML file and map it onto [`AppConfig`].
//! Values the file leaves out keep their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sp_core::AppConfig;
use sp_platform::DataDirResolver;
use tracing::info;

pub const CONFIG_ENV: &str = "SHORTCUT_PASTE_CONFIG";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Fails when the file cannot be read, is not TOML, or holds a value of
/// the wrong type.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// `SHORTCUT_PASTE_CONFIG` when set, else the platform config location.
pub fn resolve_config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => DataDirResolver::new().config_file(),
    }
}

/// Like [`load_config`], but a missing file (or no path at all) yields
/// the defaults.
pub fn load_or_default(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "loading config");
            load_config(path)
        }
        Some(path) => {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(AppConfig::default())
        }
        None => Ok(AppConfig::default()),
    }
}
