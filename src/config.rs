//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.segscope/config.toml` (user)
//! 3. `/etc/segscope/config.toml` (system)
//! 4. built-in defaults
//!
//! The environment variables `SEGSCOPE_API_BASE_URL` and `SEGSCOPE_API_ENDPOINT`
//! override whatever the file says.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, SegscopeError};

/// Default classification service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default classification endpoint path.
pub const DEFAULT_ENDPOINT: &str = "/classify_customers";

/// Environment variable overriding [`ApiConfig::base_url`].
pub const BASE_URL_ENV: &str = "SEGSCOPE_API_BASE_URL";

/// Environment variable overriding [`ApiConfig::endpoint`].
pub const ENDPOINT_ENV: &str = "SEGSCOPE_API_ENDPOINT";

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Classification service location.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port (default: http://localhost:8000).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path appended to the base URL (default: /classify_customers).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Config {
    /// Load configuration from the standard locations, then apply
    /// environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path)?,
            None => Config::default(),
        };
        config.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(ENDPOINT_ENV).ok(),
        );
        Ok(config)
    }

    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SegscopeError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            SegscopeError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Replace the base URL and/or endpoint when a non-empty value is given.
    pub fn apply_overrides(&mut self, base_url: Option<String>, endpoint: Option<String>) {
        if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(path) = endpoint.filter(|s| !s.trim().is_empty()) {
            self.api.endpoint = path;
        }
    }

    /// Full URL the upload is posted to.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.api.base_url, self.api.endpoint)
    }

    /// Resolve the config file path. `Ok(None)` means "use defaults".
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SegscopeError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".segscope").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/segscope/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
