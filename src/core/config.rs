use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::price::ExchangeEndpoint;

fn default_pair() -> String {
    "BTCUSDT".to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_target_currency() -> String {
    "CNY".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateProviderConfig {
    pub base_url: String,
    /// Overrides the EXCHANGERATE_API_KEY environment variable when set.
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub binance: Option<ExchangeEndpoint>,
    pub exchangerate: Option<RateProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            binance: Some(ExchangeEndpoint::default()),
            exchangerate: Some(RateProviderConfig {
                base_url: "https://v6.exchangerate-api.com".to_string(),
                api_key: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Trading pair quoted when no --pair flag is given.
    #[serde(default = "default_pair")]
    pub pair: String,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            pair: default_pair(),
            base_currency: default_base_currency(),
            target_currency: default_target_currency(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// built-in defaults when no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "coinfx", "coinfx")
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
}
