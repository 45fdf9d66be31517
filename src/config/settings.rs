use super::{default_state_root, ConfigError};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub state_root: Option<PathBuf>,
    #[serde(default = "default_cron_timezone")]
    pub cron_timezone: String,
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_cron_timezone() -> String {
    "UTC".to_string()
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Settings(
                "backend_url must be non-empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Settings(format!(
                "backend_url `{url}` must start with http:// or https://"
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Settings(
                "request_timeout_ms must be >= 1".to_string(),
            ));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.cron_timezone.parse::<Tz>().map_err(|_| {
            ConfigError::Settings(format!(
                "invalid cron_timezone `{}`; expected IANA timezone id",
                self.cron_timezone
            ))
        })
    }

    pub fn resolve_state_root(&self) -> Result<PathBuf, ConfigError> {
        match self.state_root.as_ref() {
            Some(root) => Ok(root.clone()),
            None => default_state_root(),
        }
    }
}
