//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    // Navigation
    pub generator: &'static str,
    pub library: &'static str,
    pub export: &'static str,
    pub help: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,

    // Palette
    pub pin: &'static str,
    pub star: &'static str,
    pub tag: &'static str,
    pub search: &'static str,
    pub dark: &'static str,

    // Selection
    pub selected: &'static str,
    pub unselected: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            generator: "\u{f1fc}",  // nf-fa-paint_brush
            library: "\u{f02d}",    // nf-fa-book
            export: "\u{f121}",     // nf-fa-code
            help: "\u{f059}",       // nf-fa-question_circle

            success: "\u{f00c}",    // nf-fa-check
            error: "\u{f00d}",      // nf-fa-times

            pin: "\u{f08d}",        // nf-fa-thumb_tack
            star: "\u{f005}",       // nf-fa-star
            tag: "\u{f02b}",        // nf-fa-tag
            search: "\u{f002}",     // nf-fa-search
            dark: "\u{f186}",       // nf-fa-moon_o

            selected: "\u{f054}",   // nf-fa-chevron_right
            unselected: " ",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}
