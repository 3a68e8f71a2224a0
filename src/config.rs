use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_RATES_URL: &str = "https://theforexapi.com";

fn default_probe_url() -> String {
    "https://www.google.com".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub rates: Option<RatesProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            rates: Some(RatesProviderConfig {
                base_url: DEFAULT_RATES_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// URL probed before converting to confirm internet access.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    /// Bind address for the HTTP API.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            probe_url: default_probe_url(),
            listen_addr: default_listen_addr(),
        }
    }
}

impl AppConfig {
    /// Loads the config from its default location, falling back to the
    /// built-in defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn rates_base_url(&self) -> &str {
        self.providers
            .rates
            .as_ref()
            .map_or(DEFAULT_RATES_URL, |p| &p.base_url)
    }
}
