//! Configuration and preference storage for Clio

pub mod preferences;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub use preferences::{FontFace, FontSize};

use crate::speech::narrator::DEFAULT_WORDS_PER_MINUTE;
use crate::theme::ThemeMode;

/// Speech settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Locale passed to the speech engine (e.g. "en-US", "pt-BR")
    pub locale: String,

    /// Narration pace
    pub words_per_minute: u32,

    /// External synthesizer: program followed by its arguments. The text to
    /// read is appended; `{locale}` in an argument is replaced by the locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_command: Option<Vec<String>>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            voice_command: None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chosen theme mode; unset means follow the terminal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,

    /// Body text style
    pub font: FontFace,

    /// Body text size
    pub font_size: FontSize,

    /// Speech engine settings
    pub speech: SpeechConfig,

    /// Topic data file to load instead of the bundled one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "clio").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "clio").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Path of the log file written while the TUI runs
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("clio.log"))
    }

    /// Theme mode to start with: stored choice, then terminal hint, then light
    pub fn initial_theme_mode(&self, detected: Option<ThemeMode>) -> ThemeMode {
        self.theme.or(detected).unwrap_or_default()
    }
}
