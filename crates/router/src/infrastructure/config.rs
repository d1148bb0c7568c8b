//! Configuration loading for the execution router
//!
//! A JSON file supplies the defaults; `HOST`, `PORT`, `HERMES_DATA_DIR` and
//! `HERMES_MAX_RETRIES` override individual fields at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root configuration for the execution router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Service name shown in logs and the console banner
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory holding `exchange-NN.json` seed files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub assets: AssetLabels,

    /// How many times a request is rerun after losing a commit race
    #[serde(default = "default_max_conflict_retries")]
    pub max_conflict_retries: u32,
}

fn default_name() -> String {
    "Hermes Execution Router".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_conflict_retries() -> u32 {
    3
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            server: ServerConfig::default(),
            assets: AssetLabels::default(),
            max_conflict_retries: default_max_conflict_retries(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(dir) = lookup("HERMES_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(retries) = lookup("HERMES_MAX_RETRIES") {
            self.max_conflict_retries = parse_var("HERMES_MAX_RETRIES", &retries)?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Display labels for the traded pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetLabels {
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_quote")]
    pub quote: String,
}

fn default_base() -> String {
    "BTC".to_string()
}

fn default_quote() -> String {
    "EUR".to_string()
}

impl Default for AssetLabels {
    fn default() -> Self {
        Self {
            base: default_base(),
            quote: default_quote(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}
