//! Contrast report and accent suggestion for a palette.

use super::PaletteSlot;
use crate::color::{
    self, contrast_ratio, rgb_to_hex, AccessibilityLevel, BLACK_LUMINANCE, WHITE_LUMINANCE,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAnalysis {
    pub hex: String,
    pub white_ratio: f64,
    pub black_ratio: f64,
    pub white_level: AccessibilityLevel,
    pub black_level: AccessibilityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccentSuggestion {
    /// Position of the suggested slot in the palette.
    pub index: usize,
    pub value: String,
    pub ratio: f64,
}

/// Contrast of every slot against white and black text. Slots whose value
/// can't be read are left out.
pub fn analyze(slots: &[PaletteSlot]) -> Vec<ColorAnalysis> {
    slots
        .iter()
        .filter_map(|slot| color::normalize(&slot.value))
        .map(|rgb| {
            let lum = rgb.luminance();
            let white_ratio = contrast_ratio(lum, WHITE_LUMINANCE);
            let black_ratio = contrast_ratio(lum, BLACK_LUMINANCE);
            ColorAnalysis {
                hex: rgb_to_hex(rgb),
                white_ratio,
                black_ratio,
                white_level: AccessibilityLevel::from_ratio(white_ratio),
                black_level: AccessibilityLevel::from_ratio(black_ratio),
            }
        })
        .collect()
}

/// The slot with the highest contrast against the middle slot.
pub fn suggest_accent(slots: &[PaletteSlot]) -> Option<AccentSuggestion> {
    let reference = slots.get(slots.len() / 2)?;
    let reference_lum = color::normalize(&reference.value)?.luminance();

    let mut best: Option<AccentSuggestion> = None;
    let readable = slots
        .iter()
        .enumerate()
        .filter_map(|(i, s)| color::normalize(&s.value).map(|rgb| (i, rgb)));
    for (index, rgb) in readable {
        let ratio = contrast_ratio(rgb.luminance(), reference_lum);
        // Strict comparison: the first slot reaching the maximum wins.
        if best.as_ref().is_none_or(|b| ratio > b.ratio) {
            best = Some(AccentSuggestion {
                index,
                value: rgb_to_hex(rgb),
                ratio,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorFormat;
    use crate::palette::PaletteSessionState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn slots(values: &[&str]) -> Vec<PaletteSlot> {
        values
            .iter()
            .map(|v| PaletteSlot::unpinned(v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_palette() {
        assert!(analyze(&[]).is_empty());
        assert_eq!(suggest_accent(&[]), None);
    }

    #[test]
    fn test_generated_palette_is_all_aaa() {
        let mut rng = StdRng::seed_from_u64(21);
        let state = PaletteSessionState::fresh(&mut rng, 5, ColorFormat::Hex);
        let report = analyze(&state.slots);
        assert_eq!(report.len(), 5);
        for entry in report {
            assert!(entry.white_ratio >= 7.0);
            assert_eq!(entry.white_level, AccessibilityLevel::Aaa);
        }
    }

    #[test]
    fn test_black_and_white() {
        let report = analyze(&slots(&["000000", "ffffff"]));
        assert!((report[0].white_ratio - 21.0).abs() < 1e-9);
        assert_eq!(report[0].black_ratio, 1.0);
        assert_eq!(report[0].black_level, AccessibilityLevel::Fail);
        assert_eq!(report[1].black_level, AccessibilityLevel::Aaa);
        assert_eq!(report[1].white_level, AccessibilityLevel::Fail);
    }

    #[test]
    fn test_malformed_values() {
        let report = analyze(&slots(&["zzzzzz", "rgb(300, 1, 1)", "rgb(255, 255, 255)"]));
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].hex, "000000");
        assert_eq!(report[1].hex, "ffffff");
    }

    #[test]
    fn test_suggest_accent_picks_max_contrast() {
        // Reference is index 1 (dark gray); white beats black against it.
        let palette = slots(&["000000", "555555", "ffffff"]);
        let accent = suggest_accent(&palette).unwrap();
        assert_eq!(accent.index, 2);
        assert_eq!(accent.value, "ffffff");
        assert!(accent.ratio > 7.0);
    }

    #[test]
    fn test_suggest_accent_first_tie_wins() {
        let palette = slots(&["ffffff", "000000", "FFFFFF"]);
        let accent = suggest_accent(&palette).unwrap();
        assert_eq!(accent.index, 0);
        assert_eq!(accent.value, "ffffff");
        assert!((accent.ratio - 21.0).abs() < 1e-9);

        // Single slot: it is its own reference.
        let accent = suggest_accent(&slots(&["123456"])).unwrap();
        assert_eq!(accent.value, "123456");
        assert_eq!(accent.ratio, 1.0);
    }

    #[test]
    fn test_suggest_accent_bad_reference() {
        assert_eq!(suggest_accent(&slots(&["000000", "nothex", "ffffff"])), None);
        // Other unreadable slots are just skipped.
        let accent = suggest_accent(&slots(&["bad", "000000", "ffffff"])).unwrap();
        assert_eq!(accent.index, 2);
        assert_eq!(accent.value, "ffffff");
    }
}
