//! Configuration management for botdeck.
//!
//! Loads configuration from ${BOTDECK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the admin API; endpoints are joined onto it.
    pub api_base_url: String,
    /// Default page size for list screens.
    pub page_size: usize,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &'static str = "http://127.0.0.1:8000/";
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Loads the config from the default path, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the config from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Template written by `botdeck config init`.
    pub fn default_template() -> String {
        format!(
            "api_base_url = \"{}\"\n# page_size = {}\n",
            Self::DEFAULT_API_BASE_URL,
            Self::DEFAULT_PAGE_SIZE
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

pub mod paths {
    //! Path resolution for botdeck configuration and data directories.
    //!
    //! BOTDECK_HOME resolution order:
    //! 1. BOTDECK_HOME environment variable (if set)
    //! 2. ~/.config/botdeck (default)

    use std::path::PathBuf;

    /// Returns the botdeck home directory.
    ///
    /// Checks BOTDECK_HOME env var first, falls back to ~/.config/botdeck
    pub fn botdeck_home() -> PathBuf {
        if let Ok(home) = std::env::var("BOTDECK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("botdeck"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        botdeck_home().join("config.toml")
    }

    /// Returns the path to the persisted session record.
    pub fn session_path() -> PathBuf {
        botdeck_home().join("session.json")
    }
}
