use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::github::DEFAULT_API_BASE;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Bookmark file; defaults to the platform data dir.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("ghmark").join("config.toml"))
}

impl Config {
    /// Load from `path`, or the default location. Missing or invalid files
    /// fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        Self::parse(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Config::default()
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        if config.api.base_url.is_empty() {
            config.api.base_url = default_base_url();
        }
        Ok(config)
    }

    pub fn store_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(crate::store::default_path)
    }
}
