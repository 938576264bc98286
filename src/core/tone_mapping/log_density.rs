use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

/// Intensity above which colours start bleaching toward white.
pub const BLEACH_THRESHOLD: f64 = 0.8;

/// Bleach reaches 1.0 at full intensity.
const BLEACH_GAIN: f64 = 5.0;

/// Log-compressed density ramp from the background to the accent colour,
/// with the densest cells bleached toward white.
///
/// Hit counts are heavily skewed (stable periodic points collect orders of
/// magnitude more hits than chaotic bands), so brightness follows
/// `ln(hits + 1) / ln(max_hits + 1)` scaled by contrast and capped at 1.
#[derive(Debug, Clone, Copy)]
pub struct LogDensityToneMap {
    log_max: f64,
    contrast: f64,
}

impl LogDensityToneMap {
    #[must_use]
    pub fn new(max_hits: u32, contrast: f64) -> Self {
        Self {
            log_max: (f64::from(max_hits) + 1.0).ln(),
            contrast,
        }
    }

    /// `None` for empty cells, an empty histogram, or a degenerate result.
    #[must_use]
    pub fn intensity(&self, hits: u32) -> Option<f64> {
        if hits == 0 || self.log_max <= 0.0 {
            return None;
        }

        let intensity = ((f64::from(hits) + 1.0).ln() / self.log_max * self.contrast).min(1.0);

        intensity.is_finite().then_some(intensity)
    }
}

fn quantize(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = f64::from(from);
    quantize(from + (f64::from(to) - from) * t)
}

fn bleach_channel(value: u8, bleach: f64) -> u8 {
    let value = f64::from(value);
    quantize(value + (255.0 - value) * bleach)
}

impl ColourMap<u32> for LogDensityToneMap {
    fn map(&self, hits: u32) -> Colour {
        let Some(intensity) = self.intensity(hits) else {
            return Colour::BACKGROUND;
        };

        let from = Colour::BACKGROUND;
        let to = Colour::ACCENT;
        let mut colour = Colour::opaque(
            lerp_channel(from.r, to.r, intensity),
            lerp_channel(from.g, to.g, intensity),
            lerp_channel(from.b, to.b, intensity),
        );

        if intensity > BLEACH_THRESHOLD {
            let bleach = (intensity - BLEACH_THRESHOLD) * BLEACH_GAIN;
            colour.r = bleach_channel(colour.r, bleach);
            colour.g = bleach_channel(colour.g, bleach);
            colour.b = bleach_channel(colour.b, bleach);
        }

        colour
    }
}
