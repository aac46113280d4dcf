use crate::core::dirs::get_config_directory;
use crate::core::error::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";
pub const DEFAULT_RESOURCE: &str = "character";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable that overrides the configured catalog URL.
pub const API_URL_ENV: &str = "CATALOG_EXPLORER_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub api_url: String,
    pub resource: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            created_at: chrono::Utc::now(),
        }
    }
}

impl ExplorerConfig {
    /// Load `config.json` from the config directory, writing defaults on first run.
    pub fn load_or_create() -> Result<Self> {
        let config_dir = get_config_directory()?;
        Self::load_or_create_in(&config_dir)
    }

    pub fn load_or_create_in(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| ExplorerError::storage_corrupt(&config_file, e))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_in(config_dir)?;
            Ok(config)
        }
    }

    /// Resolve the effective configuration for this process.
    ///
    /// Precedence: CLI flag, then environment, then the config file. An
    /// unreadable config file degrades to defaults instead of failing.
    pub fn resolve(cli_api_url: Option<&str>) -> Self {
        let mut config = Self::load_or_create().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {e}");
            Self::default()
        });

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        if let Some(url) = cli_api_url {
            config.api_url = url.to_string();
        }

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config
    }

    pub fn save_in(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)?;

        let config_file = config_dir.join("config.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_file, content)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.resource.trim().is_empty() || self.resource.contains('/') {
            return Err(ExplorerError::config_error(format!(
                "Invalid resource name: '{}'",
                self.resource
            )));
        }
        url::Url::parse(&self.api_url).map_err(|e| ExplorerError::invalid_url(&self.api_url, e))?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
