//! Random colors that stay readable under white text.

use super::{contrast_ratio, ColorFormat, Rgb, AAA_RATIO, WHITE_LUMINANCE};
use rand::Rng;

/// Upper bound for each sampled channel. Keeps colors dark enough that the
/// AAA-against-white check rarely rejects a sample.
pub const MAX_CHANNEL: u8 = 120;

/// Sample a single color with contrast >= 7 against white.
///
/// There is no retry limit; with channels capped at [`MAX_CHANNEL`] a
/// rejection is uncommon.
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    loop {
        let rgb = Rgb::new(
            rng.random_range(0..=MAX_CHANNEL),
            rng.random_range(0..=MAX_CHANNEL),
            rng.random_range(0..=MAX_CHANNEL),
        );
        if contrast_ratio(rgb.luminance(), WHITE_LUMINANCE) >= AAA_RATIO {
            return rgb;
        }
    }
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, count: usize, format: ColorFormat) -> Vec<String> {
    (0..count).map(|_| format.encode(random_rgb(rng))).collect()
}

/// Generate `count` colors in `format` using the thread-local RNG.
pub fn generate(count: usize, format: ColorFormat) -> Vec<String> {
    generate_with(&mut rand::rng(), count, format)
}
