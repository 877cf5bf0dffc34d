//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the configuration file looked up in the root directory
pub const CONFIG_FILENAME: &str = "summarise.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ignore file used when none is given on the command line.
    /// Relative paths are resolved against the root directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,

    /// Extra exclude patterns, evaluated after the built-in defaults and
    /// before the ignore file
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether the built-in default excludes apply
    #[serde(default = "default_true")]
    pub use_default_excludes: bool,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,

    /// Leave unreadable files out of the document instead of failing
    #[serde(default)]
    pub skip_unreadable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_file: None,
            exclude: Vec::new(),
            use_default_excludes: true,
            follow_links: false,
            skip_unreadable: false,
        }
    }
}

impl Config {
    /// Load `summarise.toml` from `root`, or return the default configuration
    /// if there is none
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join(CONFIG_FILENAME);

        if config_path.is_file() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }

    /// The configured ignore file, resolved against `root`
    pub fn resolved_ignore_file(&self, root: &Path) -> Option<PathBuf> {
        self.ignore_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        })
    }
}
