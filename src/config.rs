//! Configuration management for typing-log
//!
//! Provides persistent configuration that is saved to and loaded from a
//! platform-specific config file.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/typing-log/config.toml` |
//! | macOS | `~/Library/Application Support/typing-log/config.toml` |
//! | Windows | `%APPDATA%\typing-log\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use typing_log::Config;
//!
//! // Load existing config or use defaults
//! let mut config = Config::load().unwrap_or_default();
//!
//! // Modify settings
//! config.analysis.segment_count = 4;
//!
//! // Save to disk
//! config.save().expect("Failed to save config");
//! ```

use crate::text::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configured language code is not known
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("typing-log");

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Input model settings
    #[serde(default)]
    pub input: InputConfig,
    /// Log analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Language settings
    #[serde(default)]
    pub language: LanguageConfig,
}

/// Input model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Accept correct chars as soon as they are typed instead of per word
    pub accept_prefixes: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            accept_prefixes: true,
        }
    }
}

/// Log analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Number of text segments to report speeds for
    pub segment_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { segment_count: 8 }
    }
}

/// Language configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageConfig {
    /// Language code used when none is given
    pub default_code: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_code: "en".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The configured default language
    pub fn default_language(&self) -> Result<Language, ConfigError> {
        Language::from_code(&self.language.default_code)
            .ok_or_else(|| ConfigError::UnknownLanguage(self.language.default_code.clone()))
    }
}
