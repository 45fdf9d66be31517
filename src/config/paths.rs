use crate::config::ConfigError;
use std::path::PathBuf;

pub const STATE_DIR: &str = ".registry-console";
pub const SETTINGS_FILE_NAME: &str = "config.yaml";
pub const BACKEND_URL_ENV: &str = "REGISTRY_CONSOLE_BACKEND_URL";

pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(STATE_DIR))
}

pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    Ok(default_state_root()?.join(SETTINGS_FILE_NAME))
}
