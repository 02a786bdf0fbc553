//! UI chrome colors. Kept grayscale so generated swatches are the only color on screen.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg_primary: Color,
    pub bg_preview_dark: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub pass: Color,
    pub fail: Color,
}

impl ThemeColors {
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),
        bg_preview_dark: Color::Rgb(18, 18, 18),
        fg_primary: Color::Rgb(255, 255, 255),
        fg_secondary: Color::Rgb(136, 136, 136),
        accent: Color::Rgb(255, 255, 255),
        accent_alt: Color::Rgb(200, 200, 200),
        border: Color::Rgb(64, 64, 64),
        pass: Color::Rgb(200, 200, 200),
        fail: Color::Rgb(96, 96, 96),
    };
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::MONO
    }
}
