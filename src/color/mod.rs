//! Color model: HEX / `rgb()` parsing, WCAG luminance and contrast.

pub mod generator;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fallback used when an `rgb(...)` value can't be parsed.
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Minimum contrast against white for every generated color.
pub const AAA_RATIO: f64 = 7.0;
pub const AA_RATIO: f64 = 4.5;

pub const WHITE_LUMINANCE: f64 = 1.0;
pub const BLACK_LUMINANCE: f64 = 0.0;

static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)\s*$")
        .expect("rgb pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }
}

/// Output encoding of a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
}

impl ColorFormat {
    pub fn toggle(self) -> Self {
        match self {
            ColorFormat::Hex => ColorFormat::Rgb,
            ColorFormat::Rgb => ColorFormat::Hex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
        }
    }

    pub fn encode(self, rgb: Rgb) -> String {
        match self {
            ColorFormat::Hex => rgb_to_hex(rgb),
            ColorFormat::Rgb => format_rgb(rgb),
        }
    }
}

impl std::str::FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            other => Err(format!("unknown color format: {other} (expected hex or rgb)")),
        }
    }
}

/// WCAG tier for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessibilityLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "none")]
    Fail,
}

impl AccessibilityLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_RATIO {
            AccessibilityLevel::Aaa
        } else if ratio >= AA_RATIO {
            AccessibilityLevel::Aa
        } else {
            AccessibilityLevel::Fail
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessibilityLevel::Aaa => "AAA",
            AccessibilityLevel::Aa => "AA",
            AccessibilityLevel::Fail => "Fail",
        }
    }
}

/// Parse `rrggbb` or `#rrggbb`. Anything else is `None`.
pub fn parse_hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let mut bytes = [0u8; 3];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(Rgb::new(bytes[0], bytes[1], bytes[2]))
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    hex::encode([rgb.r, rgb.g, rgb.b])
}

/// Parse `rgb(r, g, b)`, case-insensitive, whitespace tolerant.
pub fn parse_rgb_string(s: &str) -> Option<Rgb> {
    let caps = RGB_RE.captures(s)?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
}

pub fn format_rgb(rgb: Rgb) -> String {
    format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b)
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in [0, 1].
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * srgb_to_linear(rgb.r) + 0.7152 * srgb_to_linear(rgb.g) + 0.0722 * srgb_to_linear(rgb.b)
}

/// WCAG contrast ratio between two luminances, always >= 1.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

fn looks_like_rgb(value: &str) -> bool {
    value
        .trim_start()
        .get(..3)
        .is_some_and(|p| p.eq_ignore_ascii_case("rgb"))
}

/// Normalize a stored palette value (either encoding) to RGB.
///
/// `rgb(...)` values that don't parse degrade to black; malformed HEX
/// values yield `None` so the caller can skip them.
pub fn normalize(value: &str) -> Option<Rgb> {
    if looks_like_rgb(value) {
        Some(parse_rgb_string(value).unwrap_or(BLACK))
    } else {
        parse_hex_to_rgb(value.trim())
    }
}

/// [`normalize`], rendered as lowercase HEX.
pub fn to_hex(value: &str) -> Option<String> {
    normalize(value).map(rgb_to_hex)
}
