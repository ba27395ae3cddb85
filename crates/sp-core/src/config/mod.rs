//! Runtime configuration DTOs.
//!
//! Data only: values come from TOML and fall back to built-in defaults when
//! absent. Resolving the file location is the bootstrap layer's job.

mod app_config;

pub use app_config::{
    AppConfig, ConfigError, MessagingConfig, OAuthConfig, StorageConfig, TabsConfig,
    DEFAULT_USERINFO_ENDPOINT,
};
