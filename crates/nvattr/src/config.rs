//! # Configuration
//!
//! Client defaults are managed by [`confique`], layered in priority order:
//!
//! 1. **Explicit overrides**: `key=value` pairs applied with
//!    [`NvattrConfig::apply_overrides`].
//! 2. **Environment variables**: `DISPLAY`, `NVATTR_FORMAT`.
//! 3. **Config file**: `nvattr.toml` in the OS config directory (via the
//!    `directories` crate).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `display` | none | Display used when an attribute string names none |
//! | `format` | `text` | Output format: `text` or `json` |

use crate::token_pairs::{parse_token_value_pairs, TokenPairError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "nvattr.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] confique::Error),

    #[error(transparent)]
    Overrides(#[from] TokenPairError),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("invalid output format '{0}' (expected 'text' or 'json')")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

fn parse_format_env(s: &str) -> Result<OutputFormat, ConfigError> {
    s.parse()
}

/// Configuration for nvattr, stored in `nvattr.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NvattrConfig {
    /// Display used when an attribute string names none (e.g. "localhost:0.0").
    #[config(env = "DISPLAY")]
    pub display: Option<String>,

    /// Output format, "text" or "json". When absent, defaults to "text".
    #[config(env = "NVATTR_FORMAT", parse_env = parse_format_env)]
    pub format: Option<OutputFormat>,
}

impl NvattrConfig {
    /// Loads from the environment and the user config file, if there is one.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_file_path().as_deref())
    }

    /// Loads from the environment and `path`. A missing file is not an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        tracing::debug!(?config, path = ?path, "loaded config");
        Ok(config)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Applies one `key=value` override. An empty display value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "display" => self.display = Some(value).filter(|v| !v.is_empty()).map(String::from),
            "format" => self.format = Some(value.parse()?),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Applies a comma-separated `key=value` list. Nothing is applied unless
    /// every pair is valid.
    pub fn apply_overrides(&mut self, list: &str) -> Result<(), ConfigError> {
        let mut pairs = Vec::new();
        parse_token_value_pairs(list, ',', |k, v| pairs.push((k.to_string(), v.to_string())))?;

        let mut updated = self.clone();
        for (key, value) in &pairs {
            updated.set(key, value)?;
        }
        *self = updated;
        Ok(())
    }
}

/// `$CONFIG_DIR/nvattr/nvattr.toml`, when the platform has a config directory.
pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nvattr").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
