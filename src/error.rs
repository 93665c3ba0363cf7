//! Error types for netblock-tsv
//!
//! This module defines custom error types using thiserror for better error handling.

use thiserror::Error;

/// Main error type for netblock-tsv
#[derive(Error, Debug)]
pub enum NetblockError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Dump file name does not map to a known registry
    #[error("Can not determine source for {0}")]
    UnknownSource(String),

    /// Address range matched no known notation
    #[error("Could not parse address range: {0}")]
    InvalidRange(String),

    /// Network object references an organization never seen in the file
    #[error("Unknown OrgID: {0}")]
    OrgNotFound(String),

    /// Required attribute absent from a block
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    /// Free-text object could not be parsed
    #[error("RPSL format error: {0}")]
    RpslFormat(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TSV writer error
    #[error("TSV write error: {0}")]
    CsvError(#[from] csv::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(String),
}

/// Result type alias for netblock-tsv
pub type Result<T> = std::result::Result<T, NetblockError>;

impl NetblockError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        NetblockError::ConfigError(msg.into())
    }

    /// Create a range error
    pub fn range<S: Into<String>>(msg: S) -> Self {
        NetblockError::InvalidRange(msg.into())
    }

    /// Create an RPSL format error
    pub fn rpsl<S: Into<String>>(msg: S) -> Self {
        NetblockError::RpslFormat(msg.into())
    }

    /// Whether this error only invalidates a single block or record
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NetblockError::InvalidRange(_)
                | NetblockError::OrgNotFound(_)
                | NetblockError::MissingAttribute(_)
                | NetblockError::RpslFormat(_)
        )
    }
}
