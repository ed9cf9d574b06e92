//! Configuration file loading for the `ply` front end.
//!
//! Settings come from `ply.toml` in the current directory, or from the path
//! given with `--config`. A missing default file means default settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `log_level` is not a tracing level name.
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Display and logging settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PlyConfig {
    /// Draw the board from Black's side. Defaults to false.
    #[serde(default)]
    pub flip_board: bool,
    /// Print rank and file labels around the board. Defaults to true.
    #[serde(default = "default_show_coordinates")]
    pub show_coordinates: bool,
    /// List the reachable squares of every piece after each move.
    /// Defaults to false.
    #[serde(default)]
    pub show_hints: bool,
    /// Log level used when no `-v` flag is given. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_show_coordinates() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PlyConfig {
    fn default() -> Self {
        PlyConfig {
            flip_board: false,
            show_coordinates: default_show_coordinates(),
            show_hints: false,
            log_level: default_log_level(),
        }
    }
}

impl PlyConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::config_path()`] is tried and defaults are used if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&config_path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path, `ply.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("ply.toml")
    }

    /// Parses `log_level` into a tracing level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
