use super::{default_settings_path, ConfigError, Settings, BACKEND_URL_ENV};

pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = default_settings_path()?;
    let mut settings = Settings::from_path(&path)?;
    if let Some(url) = std::env::var(BACKEND_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        settings.backend_url = url;
    }
    settings.validate()?;
    Ok(settings)
}
