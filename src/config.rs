use crate::error::{GitwrapError, Result};
use crate::git::parser::DEFAULT_REVISION_MARKER;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "GITWRAP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program to run for git commands; looked up on PATH when not absolute
    pub git_executable: PathBuf,
    /// Git directory, relative to the work tree unless absolute
    pub git_dir: PathBuf,
    /// Prefix of the message line that carries a foreign revision number
    pub revision_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_executable: PathBuf::from("git"),
            git_dir: PathBuf::from(".git"),
            revision_marker: DEFAULT_REVISION_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Loads `$GITWRAP_CONFIG`, or the per-user config file, or the defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("gitwrap").join("config.toml"))
    }

    /// Reads `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            GitwrapError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GitwrapError::ConfigError(e.to_string()))
    }
}
