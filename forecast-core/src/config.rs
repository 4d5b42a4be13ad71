use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/w";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://localhost:3001"
/// icon_base_url = "https://openweathermap.org/img/w"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the backend serving `/api/weather/...`.
    pub base_url: String,

    /// Host the weather icons are loaded from.
    pub icon_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the backend origin, dropping any trailing slash.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.base_url = normalize_url(url)?;
        Ok(())
    }

    pub fn set_icon_base_url(&mut self, url: &str) -> Result<()> {
        self.icon_base_url = normalize_url(url)?;
        Ok(())
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    let invalid = |reason: String| {
        anyhow!(
            "Invalid URL '{raw}': {reason}.\n\
             Hint: use an absolute http:// or https:// address, e.g. {DEFAULT_BASE_URL}."
        )
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("URL must use http or https scheme, got: {}", url.scheme())));
    }
    if url.host().is_none() {
        return Err(invalid("URL must have a host".to_string()));
    }
    if url.port() == Some(0) {
        return Err(invalid("Port cannot be 0".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
