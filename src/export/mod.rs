//! Style-sheet snippets for the current palette.

use crate::color;
use crate::palette::PaletteSlot;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// CSS custom properties on `:root`.
    #[default]
    Css,
    /// SCSS `$color-N` variables.
    Scss,
    /// Tailwind `theme.extend.colors` config.
    Tailwind,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Css, ExportFormat::Scss, ExportFormat::Tailwind];

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Css => "CSS variables",
            ExportFormat::Scss => "SCSS variables",
            ExportFormat::Tailwind => "Tailwind config",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ExportFormat::Css => ExportFormat::Scss,
            ExportFormat::Scss => ExportFormat::Tailwind,
            ExportFormat::Tailwind => ExportFormat::Css,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ExportFormat::Css => ExportFormat::Tailwind,
            ExportFormat::Scss => ExportFormat::Css,
            ExportFormat::Tailwind => ExportFormat::Scss,
        }
    }
}

/// Render the palette as a snippet. Colors are numbered from 1; values that
/// can't be read are skipped.
pub fn render(format: ExportFormat, slots: &[PaletteSlot]) -> String {
    let colors: Vec<String> = slots.iter().filter_map(|s| color::to_hex(&s.value)).collect();
    let mut out = String::new();
    match format {
        ExportFormat::Css => {
            out.push_str(":root {\n");
            for (i, hex) in colors.iter().enumerate() {
                let _ = writeln!(out, "  --color-{}: #{hex};", i + 1);
            }
            out.push_str("}\n");
        }
        ExportFormat::Scss => {
            for (i, hex) in colors.iter().enumerate() {
                let _ = writeln!(out, "$color-{}: #{hex};", i + 1);
            }
        }
        ExportFormat::Tailwind => {
            out.push_str("module.exports = {\n  theme: {\n    extend: {\n      colors: {\n");
            for (i, hex) in colors.iter().enumerate() {
                let _ = writeln!(out, "        color{}: '#{hex}',", i + 1);
            }
            out.push_str("      },\n    },\n  },\n};\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> Vec<PaletteSlot> {
        vec![
            PaletteSlot::unpinned("1A2B3C".into()),
            PaletteSlot::unpinned("broken".into()),
            PaletteSlot {
                value: "rgb(0, 128, 255)".into(),
                is_pinned: true,
            },
        ]
    }

    #[test]
    fn test_css() {
        assert_eq!(
            render(ExportFormat::Css, &slots()),
            ":root {\n  --color-1: #1a2b3c;\n  --color-2: #0080ff;\n}\n"
        );
    }

    #[test]
    fn test_scss() {
        assert_eq!(
            render(ExportFormat::Scss, &slots()),
            "$color-1: #1a2b3c;\n$color-2: #0080ff;\n"
        );
    }

    #[test]
    fn test_tailwind() {
        let out = render(ExportFormat::Tailwind, &slots());
        assert!(out.starts_with("module.exports = {"));
        assert!(out.contains("        color1: '#1a2b3c',\n"));
        assert!(out.contains("        color2: '#0080ff',\n"));
        assert!(!out.contains("color3"));
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(render(ExportFormat::Css, &[]), ":root {\n}\n");
        assert_eq!(render(ExportFormat::Scss, &[]), "");
    }

    #[test]
    fn test_format_cycle() {
        for f in ExportFormat::ALL {
            assert_eq!(f.next().prev(), f);
        }
    }
}
