use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::clipboard::MAX_CLIPBOARD_ITEMS;
use crate::history::MAX_HISTORY_ENTRIES;

pub const DEFAULT_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config key `{key}` must be {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Application configuration DTO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub messaging: MessagingConfig,
    pub tabs: TabsConfig,
    pub oauth: OAuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON document backing the key-value store. `None` keeps data in memory.
    pub data_file: Option<PathBuf>,
    pub max_clipboard_items: usize,
    pub max_history_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    /// Attempts for a paste message to reach the content script.
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub ping_timeout_ms: u64,
    /// Wait after injecting the content script before messaging it.
    pub injection_settle_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsConfig {
    /// URL prefixes refused in addition to the built-in restricted list.
    pub extra_restricted_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub userinfo_endpoint: String,
    /// Pre-granted access token served by the local identity provider.
    pub token: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_clipboard_items: MAX_CLIPBOARD_ITEMS,
            max_history_entries: MAX_HISTORY_ENTRIES,
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            retry_attempts: 3,
            retry_delay_ms: 200,
            ping_timeout_ms: 1000,
            injection_settle_ms: 100,
        }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            userinfo_endpoint: DEFAULT_USERINFO_ENDPOINT.to_string(),
            token: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from a parsed TOML document.
    ///
    /// Missing keys keep their defaults; present keys of the wrong type are
    /// rejected.
    pub fn from_toml(value: &toml::Value) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let section = |name: &str| value.get(name);

        if let Some(storage) = section("storage") {
            if let Some(path) = read_str(storage, "storage", "data_file")? {
                config.storage.data_file = Some(PathBuf::from(path));
            }
            if let Some(n) = read_usize(storage, "storage", "max_clipboard_items")? {
                config.storage.max_clipboard_items = n;
            }
            if let Some(n) = read_usize(storage, "storage", "max_history_entries")? {
                config.storage.max_history_entries = n;
            }
        }

        if let Some(messaging) = section("messaging") {
            if let Some(n) = read_u64(messaging, "messaging", "retry_attempts")? {
                config.messaging.retry_attempts = u32::try_from(n).map_err(|_| invalid(
                    "messaging",
                    "retry_attempts",
                    "a 32-bit count",
                ))?;
            }
            if let Some(n) = read_u64(messaging, "messaging", "retry_delay_ms")? {
                config.messaging.retry_delay_ms = n;
            }
            if let Some(n) = read_u64(messaging, "messaging", "ping_timeout_ms")? {
                config.messaging.ping_timeout_ms = n;
            }
            if let Some(n) = read_u64(messaging, "messaging", "injection_settle_ms")? {
                config.messaging.injection_settle_ms = n;
            }
        }

        if let Some(tabs) = section("tabs") {
            if let Some(raw) = tabs.get("extra_restricted_prefixes") {
                let list = raw
                    .as_array()
                    .ok_or_else(|| invalid("tabs", "extra_restricted_prefixes", "an array of strings"))?;
                config.tabs.extra_restricted_prefixes = list
                    .iter()
                    .map(|v| {
                        v.as_str().map(str::to_string).ok_or_else(|| {
                            invalid("tabs", "extra_restricted_prefixes", "an array of strings")
                        })
                    })
                    .collect::<Result<_, _>>()?;
            }
        }

        if let Some(oauth) = section("oauth") {
            if let Some(endpoint) = read_str(oauth, "oauth", "userinfo_endpoint")? {
                config.oauth.userinfo_endpoint = endpoint.to_string();
            }
            if let Some(token) = read_str(oauth, "oauth", "token")? {
                config.oauth.token = Some(token.to_string()).filter(|t| !t.is_empty());
            }
        }

        Ok(config)
    }

    /// Persist the store under `data_dir` unless a data file is configured.
    pub fn default_data_dir(mut self, data_dir: &Path) -> Self {
        if self.storage.data_file.is_none() {
            self.storage.data_file = Some(data_dir.join("store.json"));
        }
        self
    }
}

fn invalid(section: &str, key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: format!("{section}.{key}"),
        expected,
    }
}

fn read_str<'a>(
    table: &'a toml::Value,
    section: &str,
    key: &str,
) -> Result<Option<&'a str>, ConfigError> {
    table
        .get(key)
        .map(|v| v.as_str().ok_or_else(|| invalid(section, key, "a string")))
        .transpose()
}

fn read_u64(table: &toml::Value, section: &str, key: &str) -> Result<Option<u64>, ConfigError> {
    table
        .get(key)
        .map(|v| {
            v.as_integer()
                .and_then(|n| u64::try_from(n).ok())
                .ok_or_else(|| invalid(section, key, "a non-negative integer"))
        })
        .transpose()
}

fn read_usize(table: &toml::Value, section: &str, key: &str) -> Result<Option<usize>, ConfigError> {
    read_u64(table, section, key)?
        .map(|n| usize::try_from(n).map_err(|_| invalid(section, key, "a non-negative integer")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    fn parse(s: &str) -> Result<AppConfig, ConfigError> {
        let value: Value = toml::from_str(s).unwrap();
        AppConfig::from_toml(&value)
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.messaging.retry_attempts, 3);
        assert_eq!(config.messaging.ping_timeout_ms, 1000);
        assert_eq!(config.messaging.injection_settle_ms, 100);
        assert_eq!(config.storage.max_clipboard_items, 1000);
        assert_eq!(config.oauth.userinfo_endpoint, DEFAULT_USERINFO_ENDPOINT);
    }

    #[test]
    fn present_keys_override_defaults() {
        let config = parse(
            r#"
            [storage]
            data_file = "/tmp/sp/store.json"
            max_history_entries = 10

            [messaging]
            retry_delay_ms = 5

            [tabs]
            extra_restricted_prefixes = ["file://"]

            [oauth]
            token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.data_file, Some(PathBuf::from("/tmp/sp/store.json")));
        assert_eq!(config.storage.max_history_entries, 10);
        assert_eq!(config.storage.max_clipboard_items, 1000);
        assert_eq!(config.messaging.retry_delay_ms, 5);
        assert_eq!(config.messaging.retry_attempts, 3);
        assert_eq!(config.tabs.extra_restricted_prefixes, vec!["file://".to_string()]);
        assert_eq!(config.oauth.token.as_deref(), Some("abc"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = parse("[messaging]\nping_timeout_ms = \"soon\"").unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "messaging.ping_timeout_ms".into(),
                expected: "a non-negative integer"
            }
        );
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(parse("[storage]\nmax_clipboard_items = -1").is_err());
    }

    #[test]
    fn default_data_dir_keeps_explicit_file() {
        let config = AppConfig::default().default_data_dir(Path::new("/tmp/test"));
        assert_eq!(config.storage.data_file, Some(PathBuf::from("/tmp/test/store.json")));

        let explicit = parse("[storage]\ndata_file = \"/srv/sp.json\"").unwrap();
        let config = explicit.default_data_dir(Path::new("/tmp/test"));
        assert_eq!(config.storage.data_file, Some(PathBuf::from("/srv/sp.json")));
    }
}
