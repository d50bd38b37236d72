use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::open_meteo::{FORECAST_URL, GEOCODING_URL};

pub const DEFAULT_PORT: u16 = 7860;

/// Upstream service locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub weather_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            weather_url: FORECAST_URL.to_string(),
        }
    }
}

/// Settings for the web form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Listen on every interface instead of loopback only.
    pub share: bool,

    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, share: false, debug: false }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [endpoints]
/// geocoding_url = "https://geocoding-api.open-meteo.com/v1/search"
///
/// [server]
/// port = 7860
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub server: ServerConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-oracle", "oracle-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
