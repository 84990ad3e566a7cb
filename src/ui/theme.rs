//! Theme color definitions for the UI
//!
//! Provides dark and light color palettes selected from the config.

use crate::config::Theme;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text, borders
    pub dim: Color,
    /// Accent color (headings, metric codes)
    pub accent: Color,
    /// Sample values
    pub value: Color,
    /// Summary figures
    pub summary: Color,
    /// Status messages
    pub notice: Color,
    /// Status bar background
    pub bar_bg: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 22, 30),
            fg: Color::Rgb(200, 200, 210),
            dim: Color::Rgb(90, 90, 110),
            accent: Color::Rgb(80, 200, 220),
            value: Color::Rgb(80, 200, 120),
            summary: Color::Rgb(240, 180, 80),
            notice: Color::Rgb(240, 90, 100),
            bar_bg: Color::Rgb(40, 40, 50),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            value: Color::Rgb(30, 150, 70),
            summary: Color::Rgb(180, 120, 0),
            notice: Color::Rgb(200, 50, 60),
            bar_bg: Color::Rgb(220, 220, 228),
        }
    }
}
