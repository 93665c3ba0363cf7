//! Path utilities for configuration and dump files
//!
//! Handles XDG directory specifications and path resolution.

use crate::error::{NetblockError, Result};
use std::env;
use std::path::PathBuf;

/// Get the netblock-tsv configuration directory
///
/// Priority:
/// 1. NETBLOCK_CONFIG_HOME environment variable
/// 2. XDG_CONFIG_HOME/netblock-tsv
/// 3. ~/.config/netblock-tsv (fallback)
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("NETBLOCK_CONFIG_HOME") {
        return Ok(PathBuf::from(path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("netblock-tsv"));
    }

    Err(NetblockError::config("Unable to determine configuration directory"))
}

/// Get the path to the config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_name() {
        let file = config_file().unwrap();
        assert!(file.ends_with("config.yaml"));
    }

    #[test]
    fn test_expand_tilde() {
        if dirs::home_dir().is_some() {
            let path = expand_tilde("~/databases");
            assert!(!path.to_string_lossy().starts_with('~'));
            assert!(path.ends_with("databases"));
        }
    }

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(expand_tilde("./databases"), PathBuf::from("./databases"));
    }
}
