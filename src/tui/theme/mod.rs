//! Theme configuration - Monochrome grayscale chrome around the swatches

pub mod icons;
pub mod palette;

pub use icons::Icons;
pub use palette::ThemeColors;

/// Active theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: ThemeColors,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: ThemeColors::MONO,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> ratatui::symbols::border::Set<'static> {
        ratatui::symbols::border::ROUNDED
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}
