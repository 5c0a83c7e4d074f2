//! Layered configuration.
//!
//! Later layers win: built-in defaults, the TOML file (`--config`, or the
//! per-user file when it exists), `.env` in the working directory, the process
//! environment, then command-line flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use predictor_client::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, LogLevel};

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "PREDICTOR_LOG_LEVEL";

/// Directory under the user config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "startup-predictor";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// `<config dir>/startup-predictor/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Resolve against the real environment and `.env`.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let dotenv = read_dotenv();
        Self::resolve_with(cli, Self::default_path().as_deref(), |key| {
            std::env::var(key).ok().or_else(|| dotenv.get(key).cloned())
        })
    }

    /// Resolve with an explicit default file location and variable lookup.
    ///
    /// `--config` must point at a readable file; the default location is only
    /// used when it exists.
    pub fn resolve_with<F>(cli: &Cli, default_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match (&cli.config, default_path) {
            (Some(path), _) => Self::load(path)?,
            (None, Some(path)) if path.is_file() => Self::load(path)?,
            _ => Self::default(),
        };

        config.api.apply_env_overrides_from(&lookup);
        if let Some(level) = lookup(LOG_LEVEL_ENV).and_then(|v| LogLevel::from_str_loose(&v)) {
            config.logging.level = level.as_filter_str().to_string();
        }

        if let Some(url) = &cli.api_url {
            config.api.api_url = url.trim().to_string();
        }
        if let Some(level) = cli.log_level {
            config.logging.level = level.as_filter_str().to_string();
        }
        if cli.json_logs {
            config.logging.json = true;
        }

        config.api.validate()?;
        Ok(config)
    }
}

/// Entries of `./.env`, without touching the process environment.
fn read_dotenv() -> HashMap<String, String> {
    match dotenvy::dotenv_iter() {
        Ok(iter) => iter.filter_map(|entry| entry.ok()).collect(),
        Err(_) => HashMap::new(),
    }
}
