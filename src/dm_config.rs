// User configuration and persistence
// Board dimensions, optional fixed seed and display preferences, stored as TOML

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::dm_error::ConfigError;

pub const DEFAULT_SIZE: usize = 10;
pub const DEFAULT_MINES: usize = 15;
const MIN_SIZE: usize = 2;
const MAX_SIZE: usize = 30;

/// User configuration
/// Persisted to disk as TOML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub size: usize,       // Cells per side
    pub mines: usize,      // Mines per board
    pub seed: Option<u64>, // Fixed RNG seed for reproducible boards
    pub language: String,  // Language code ("en" or "vi")
    pub ascii_icons: bool, // Use ASCII fallback icons
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let language = if system_lang.to_lowercase().starts_with("vi") {
            "vi".to_string()
        } else {
            "en".to_string()
        };

        Config {
            size: DEFAULT_SIZE,
            mines: DEFAULT_MINES,
            seed: None,
            language,
            ascii_icons: false,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml(s: &str) -> Result<Config, ConfigError> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check board dimensions are playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize(self.size));
        }
        let max = self.size * self.size - 1;
        if self.mines == 0 || self.mines > max {
            return Err(ConfigError::InvalidMines {
                mines: self.mines,
                max,
            });
        }
        Ok(())
    }
}

/// Get the configuration file path
/// Uses platform-specific config directory (e.g., ~/.config/domin/domin.toml on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Some(proj) = ProjectDirs::from("com", "domin", "domin") {
        return Ok(proj.config_dir().join("domin.toml"));
    }
    env::current_dir()
        .map(|dir| dir.join("domin.toml"))
        .map_err(|_| ConfigError::NoConfigDir)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml(&s)
}

/// Write configuration to disk as TOML, creating the parent directory
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let s = toml::to_string(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, s).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from disk, or create default if not found
/// Problems are logged and never fatal: the defaults are used instead
pub fn load_or_create_config() -> Config {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}, using defaults");
            return Config::default();
        }
    };
    if path.exists() {
        match read_config(&path) {
            Ok(cfg) => {
                info!(path = %path.display(), "loaded config");
                return cfg;
            }
            Err(e) => {
                warn!(path = %path.display(), "{e}, using defaults");
                return Config::default();
            }
        }
    }
    let cfg = Config::default();
    match save_config(&cfg, &path) {
        Ok(()) => info!(path = %path.display(), "created default config"),
        Err(e) => warn!("{e}"),
    }
    cfg
}
