use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "OUTREACH_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("No config directory available")]
    NoConfigDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
        }
    }
}

impl AppConfig {
    pub fn path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "outreach-dashboard")?;
        Some(proj.config_dir().join("config.toml"))
    }

    /// Loads the user config, falling back to defaults, then applies `OUTREACH_API_URL`.
    pub fn load() -> Self {
        let env_url = std::env::var(API_URL_ENV).ok();
        match Self::path() {
            Some(path) => Self::load_from(&path, env_url.as_deref()),
            None => Self::default().with_override(env_url.as_deref()),
        }
    }

    pub fn load_from(path: &Path, env_url: Option<&str>) -> Self {
        let config = match Self::read(path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(err) => {
                log::warn!("ignoring config at {}: {err}", path.display());
                Self::default()
            }
        };
        config.with_override(env_url)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;
        config.api_base_url = normalize_url(&config.api_base_url);
        Ok(config)
    }

    fn with_override(mut self, env_url: Option<&str>) -> Self {
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = normalize_url(url);
        }
        self
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Trims whitespace and trailing slashes; bare hosts default to plain http.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_and_strips_slash() {
        assert_eq!(normalize_url(" localhost:5000/api/ "), "http://localhost:5000/api");
        assert_eq!(normalize_url("https://crm.example.com/api"), "https://crm.example.com/api");
        assert_eq!(normalize_url("   "), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"), None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api_base_url: "http://10.0.0.5:5000/api".into(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path, None), config);
    }

    #[test]
    fn env_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"http://file-host/api\"\n").unwrap();
        let config = AppConfig::load_from(&path, Some("env-host:8080/api/"));
        assert_eq!(config.api_base_url, "http://env-host:8080/api");
    }

    #[test]
    fn garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = [").unwrap();
        assert_eq!(AppConfig::load_from(&path, None), AppConfig::default());
    }
}
