//! Configuration management for hints.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config/data directory name.
const DATA_DIR_NAME: &str = "hints";

/// Default window position file name.
const POSITION_FILE_NAME: &str = "window.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HINTS_`)
/// 2. TOML config file at `~/.config/hints/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hint deck configuration.
    pub deck: DeckConfig,
    /// Overlay window configuration.
    pub window: WindowConfig,
}

/// Hint-deck-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Name of the hints directory inside an aircraft's own directory.
    pub dir_name: String,
    /// Maximum hint image dimension (width or height) in pixels.
    /// Larger images are skipped at load time. Set to 0 for unlimited.
    pub max_dimension: u32,
}

/// Overlay-window-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Overlay window width in pixels.
    pub width: u32,
    /// Overlay window height in pixels.
    pub height: u32,
    /// Default placement keeps the window `screen_size / proportion` pixels
    /// in from the screen edge.
    pub from_edge_proportion: u32,
    /// Cap on the computed edge offset in pixels.
    pub from_edge_min: u32,
    /// Path to the window position file.
    /// Defaults to `~/.config/hints/window.json`
    pub position_file: Option<PathBuf>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            dir_name: "hints".to_string(),
            max_dimension: 8192,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            from_edge_proportion: 20,
            from_edge_min: 50,
            position_file: None, // Will be resolved to default at runtime
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `HINTS_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        // Nested keys use a double underscore, e.g. HINTS_DECK__DIR_NAME
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("HINTS_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default config directory path.
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "window size {}x{} must be non-zero in both dimensions",
                    self.window.width, self.window.height
                ),
            });
        }

        if self.window.from_edge_proportion == 0 {
            return Err(Error::ConfigValidation {
                message: "from_edge_proportion must be greater than 0".to_string(),
            });
        }

        if self.deck.dir_name.is_empty() {
            return Err(Error::ConfigValidation {
                message: "deck dir_name must not be empty".to_string(),
            });
        }

        if self.deck.dir_name.contains(['/', '\\']) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "deck dir_name '{}' must be a plain directory name",
                    self.deck.dir_name
                ),
            });
        }

        Ok(())
    }

    /// Get the window position file path, resolving defaults if not set.
    #[must_use]
    pub fn position_file_path(&self) -> PathBuf {
        self.window
            .position_file
            .clone()
            .unwrap_or_else(|| Self::default_config_dir().join(POSITION_FILE_NAME))
    }
}
