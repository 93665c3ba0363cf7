//! Configuration module for netblock-tsv
//!
//! Handles loading and managing configuration from YAML files and environment variables.

use crate::error::{NetblockError, Result};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding the dump files
    #[serde(default = "default_input_directory")]
    pub directory: String,

    /// Dump file names, processed in this order
    #[serde(default = "default_files")]
    pub files: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// TSV file to write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Debug logging
    #[serde(default)]
    pub debug: bool,

    /// Config file the settings were read from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

// Default value functions
fn default_input_directory() -> String {
    env::var("NETBLOCK_DB_HOME").unwrap_or_else(|_| "./databases".to_string())
}

fn default_files() -> Vec<String> {
    [
        "afrinic.db.gz",
        "apnic.db.inet6num.gz",
        "apnic.db.inetnum.gz",
        "arin.db.gz",
        "lacnic.db.gz",
        "ripe.db.inetnum.gz",
        "ripe.db.inet6num.gz",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_directory(),
            files: default_files(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location and environment variables
    ///
    /// A missing config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        Self::load_from(&path::config_file()?)
    }

    /// Load configuration from a specific file and environment variables
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let mut config = if config_file.exists() {
            let content = fs::read_to_string(config_file).map_err(|e| {
                NetblockError::config(format!("Failed to read config file: {}", e))
            })?;

            let mut config: AppConfig = serde_yaml::from_str(&content).map_err(|e| {
                NetblockError::YamlError(format!("Failed to parse config file: {}", e))
            })?;
            config.global.config_path = Some(config_file.to_path_buf());
            config
        } else {
            log::debug!("Config file {} not found, using defaults", config_file.display());
            Self::default()
        };

        // Override with environment variables
        config.apply_env();

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env(&mut self) {
        if let Ok(val) = env::var("NETBLOCK_DB_HOME") {
            self.input.directory = val;
        }
        if let Ok(val) = env::var("NETBLOCK_OUTPUT") {
            self.output.path = Some(val);
        }
    }

    /// Serialize the effective configuration
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| NetblockError::YamlError(format!("Failed to serialize config: {}", e)))
    }

    /// Input directory with `~` expanded
    pub fn input_directory(&self) -> PathBuf {
        path::expand_tilde(&self.input.directory)
    }

    /// Output path; a run without one is a configuration error
    pub fn output_path(&self) -> Result<PathBuf> {
        match self.output.path.as_deref() {
            Some(p) if !p.trim().is_empty() => Ok(path::expand_tilde(p)),
            _ => Err(NetblockError::config("no output file given (use -o <FILE>)")),
        }
    }
}
