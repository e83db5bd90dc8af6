// Error types for configuration handling
// Board and controller operations have no error surface: invalid input is a no-op

use std::path::PathBuf;

/// Errors that can occur when loading or saving the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration directory available")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("board size {0} out of range (2-30)")]
    InvalidSize(usize),

    #[error("mine count {mines} must be between 1 and {max}")]
    InvalidMines { mines: usize, max: usize },
}
