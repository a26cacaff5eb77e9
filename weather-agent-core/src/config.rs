use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    alias::DEFAULT_CITY,
    provider::open_meteo::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

/// Base URLs of the geocoding and forecast services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "bangalore"
///
/// [llm]
/// api_key = "..."
/// model = "gpt-4o-mini"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City used when a question names no recognisable place.
    pub default_city: String,

    /// Where registered emails are kept; the platform data directory when absent.
    pub users_file: Option<PathBuf>,

    pub llm: LlmConfig,
    pub endpoints: EndpointConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            users_file: None,
            llm: LlmConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
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
        let mut cfg: Config = toml::from_str(contents)?;
        if cfg.default_city.trim().is_empty() {
            cfg.default_city = DEFAULT_CITY.to_string();
        }
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
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

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path of the registered-users file, honouring an explicit `users_file`.
    pub fn users_file_path(&self) -> Result<PathBuf> {
        match &self.users_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("users.json")),
        }
    }

    pub fn set_llm_api_key(&mut self, api_key: String) {
        self.llm.api_key = Some(api_key);
    }

    /// API key from the config file, falling back to `OPENAI_API_KEY`.
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm_api_key_or(std::env::var(API_KEY_ENV).ok())
    }

    /// API key from the config file, falling back to `env_key`.
    pub fn llm_api_key_or(&self, env_key: Option<String>) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env_key.filter(|k| !k.trim().is_empty()))
    }

    pub fn set_default_city(&mut self, city: &str) {
        let city = city.trim().to_lowercase();
        if !city.is_empty() {
            self.default_city = city;
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-agent", "weather-agent")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
