//! Theming system for Clio

mod tokyo_day;
mod tokyo_night;

pub use tokyo_day::TOKYO_DAY;
pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Light or dark appearance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse "light" or "dark"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Guess the terminal background from a `COLORFGBG` value ("15;0")
    ///
    /// The last field is the background color index; 7 and 15 are the
    /// light greys, 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match bg {
            7 | 15 => Some(ThemeMode::Light),
            0..=6 | 8 => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Mode suggested by the terminal environment, if it says anything
    pub fn detect() -> Option<Self> {
        std::env::var("COLORFGBG").ok().as_deref().and_then(Self::from_colorfgbg)
    }
}

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
    /// Background of the word being read aloud
    pub spoken_word: Color,
}

impl Theme {
    /// The palette for a light/dark mode
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Theme::tokyo_day(),
            ThemeMode::Dark => Theme::tokyo_night(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::for_mode(ThemeMode::default())
    }
}
