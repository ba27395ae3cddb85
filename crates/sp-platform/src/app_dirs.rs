use std::path::PathBuf;

const APP_DIR_NAME: &str = "shortcut-paste";
const PROFILE_ENV: &str = "SP_PROFILE";

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Locates the per-user directories the host writes to.
pub struct DataDirResolver {
    base_override: Option<PathBuf>,
}

impl DataDirResolver {
    pub fn new() -> Self {
        Self { base_override: None }
    }

    /// Resolve under `base` instead of the system directories.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            base_override: Some(base),
        }
    }

    /// `<data_local_dir>/shortcut-paste[-<profile>]`, `None` when the system
    /// directory is unknown.
    pub fn data_dir(&self) -> Option<PathBuf> {
        let base = match &self.base_override {
            Some(base) => base.clone(),
            None => dirs::data_local_dir()?,
        };
        Some(base.join(resolved_app_dir_name()))
    }

    /// `<config_dir>/shortcut-paste[-<profile>]/config.toml`.
    pub fn config_file(&self) -> Option<PathBuf> {
        let base = match &self.base_override {
            Some(base) => base.clone(),
            None => dirs::config_dir()?,
        };
        Some(base.join(resolved_app_dir_name()).join("config.toml"))
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.data_dir().map(|dir| dir.join("logs"))
    }
}

impl Default for DataDirResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static PROFILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_profile<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = PROFILE_ENV_LOCK.lock().unwrap();
        let previous = std::env::var(PROFILE_ENV).ok();

        match value {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        let result = f();

        match previous {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        result
    }

    #[test]
    fn appends_app_dir_name() {
        with_profile(None, || {
            let resolver = DataDirResolver::with_base_dir(PathBuf::from("/tmp"));
            assert_eq!(resolver.data_dir(), Some(PathBuf::from("/tmp/shortcut-paste")));
            assert_eq!(
                resolver.config_file(),
                Some(PathBuf::from("/tmp/shortcut-paste/config.toml"))
            );
        });
    }

    #[test]
    fn profiles_are_isolated() {
        let dir = with_profile(Some("work"), || {
            DataDirResolver::with_base_dir(PathBuf::from("/tmp")).data_dir()
        });

        assert_eq!(dir, Some(PathBuf::from("/tmp/shortcut-paste-work")));
    }
}
