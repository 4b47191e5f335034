//! Reading preferences: font face and font size
//!
//! A terminal cannot change fonts, so the face maps to a text modifier on
//! body text and the size maps to the width of the reading column.

use ratatui::style::Modifier;
use serde::{Deserialize, Serialize};

/// Body text style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    pub fn name(self) -> &'static str {
        match self {
            FontFace::Regular => "regular",
            FontFace::Bold => "bold",
            FontFace::Italic => "italic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Modifier applied to body text
    pub fn modifier(self) -> Modifier {
        match self {
            FontFace::Regular => Modifier::empty(),
            FontFace::Bold => Modifier::BOLD,
            FontFace::Italic => Modifier::ITALIC,
        }
    }

    /// The next face, wrapping around
    pub fn cycled(self) -> Self {
        match self {
            FontFace::Regular => FontFace::Bold,
            FontFace::Bold => FontFace::Italic,
            FontFace::Italic => FontFace::Regular,
        }
    }
}

/// Text size, rendered as reading column width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn name(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Maximum characters per line of body text
    pub fn column_width(self) -> u16 {
        match self {
            FontSize::Small => 100,
            FontSize::Medium => 80,
            FontSize::Large => 64,
        }
    }

    pub fn larger(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            _ => FontSize::Large,
        }
    }

    pub fn smaller(self) -> Self {
        match self {
            FontSize::Large => FontSize::Medium,
            _ => FontSize::Small,
        }
    }
}
