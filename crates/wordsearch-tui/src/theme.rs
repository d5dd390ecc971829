use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Grid letter color
    pub letter: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Line anchor background
    pub anchor_bg: Color,
    /// Pending selection background
    pub selection_bg: Color,
    /// Found word background
    pub found_bg: Color,
    /// Hint cell background
    pub hint_bg: Color,
    /// Error color
    pub error: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

/// Persisted theme choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeKind {
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::HighContrast,
            ThemeKind::HighContrast => ThemeKind::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::HighContrast => "High contrast",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::HighContrast => Theme::high_contrast(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 43, g: 43, b: 43 },
            fg: Color::Rgb { r: 255, g: 255, b: 255 },
            border: Color::Rgb { r: 90, g: 90, b: 100 },
            letter: Color::Rgb { r: 230, g: 230, b: 240 },
            cursor_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            anchor_bg: Color::Rgb { r: 0, g: 123, b: 255 },
            selection_bg: Color::Rgb { r: 42, g: 130, b: 218 },
            found_bg: Color::Rgb { r: 74, g: 95, b: 74 },
            hint_bg: Color::Rgb { r: 140, g: 110, b: 30 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 249, b: 250 },
            fg: Color::Rgb { r: 33, g: 37, b: 41 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            letter: Color::Rgb { r: 33, g: 37, b: 41 },
            cursor_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            anchor_bg: Color::Rgb { r: 120, g: 170, b: 255 },
            selection_bg: Color::Rgb { r: 204, g: 229, b: 255 },
            found_bg: Color::Rgb { r: 200, g: 230, b: 201 },
            hint_bg: Color::Rgb { r: 255, g: 243, b: 205 },
            error: Color::Rgb { r: 220, g: 53, b: 69 },
            success: Color::Rgb { r: 40, g: 167, b: 69 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 0, g: 123, b: 255 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            letter: Color::White,
            cursor_bg: Color::Blue,
            anchor_bg: Color::DarkBlue,
            selection_bg: Color::DarkCyan,
            found_bg: Color::DarkGreen,
            hint_bg: Color::DarkYellow,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
