use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    generate_pixel_buffer, generate_pixel_buffer_cancelable, GeneratePixelBufferError,
};
use crate::core::data::hit_histogram::HitHistogram;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::tone_mapping::log_density::LogDensityToneMap;

/// Renders the histogram's current counts without consuming it.
pub fn tone_map(histogram: &HitHistogram, contrast: f64) -> Result<PixelBuffer, PixelBufferError> {
    let colour_map = LogDensityToneMap::new(histogram.max_hits(), contrast);

    generate_pixel_buffer(
        histogram.counts(),
        &colour_map,
        histogram.width(),
        histogram.height(),
    )
}

pub fn tone_map_cancelable<C: CancelToken>(
    histogram: &HitHistogram,
    contrast: f64,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError> {
    let colour_map = LogDensityToneMap::new(histogram.max_hits(), contrast);

    generate_pixel_buffer_cancelable(
        histogram.counts(),
        &colour_map,
        histogram.width(),
        histogram.height(),
        cancel,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;

    #[test]
    fn test_empty_histogram_tone_maps_to_background() {
        let histogram = HitHistogram::new(1, 1);

        let buffer = tone_map(&histogram, 2.0).unwrap();

        assert_eq!(buffer.buffer(), &vec![13, 14, 18, 255]);
    }

    #[test]
    fn test_peak_cell_is_white_and_empty_cells_background() {
        let mut histogram = HitHistogram::new(3, 2);
        for _ in 0..9 {
            histogram.record(2, 1);
        }
        histogram.record(0, 0);

        let buffer = tone_map(&histogram, 1.0).unwrap();

        assert_eq!(buffer.pixel(2, 1).unwrap(), Colour::WHITE);
        assert_eq!(buffer.pixel(1, 0).unwrap(), Colour::BACKGROUND);
        assert_ne!(buffer.pixel(0, 0).unwrap(), Colour::BACKGROUND);
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
    }

    #[test]
    fn test_cancelable_and_plain_tone_map_agree() {
        let mut histogram = HitHistogram::new(40, 30);
        for column in 0..40 {
            for step in 0..(column + 1) {
                histogram.record(column, (column + step) % 30);
            }
        }

        let plain = tone_map(&histogram, 1.5).unwrap();
        let cancelable = tone_map_cancelable(&histogram, 1.5, &NeverCancel).unwrap();

        assert_eq!(plain, cancelable);
    }

    #[test]
    fn test_tone_map_leaves_histogram_untouched() {
        let mut histogram = HitHistogram::new(2, 2);
        histogram.record(1, 1);
        let before = histogram.clone();

        let _ = tone_map(&histogram, 1.0).unwrap();

        assert_eq!(histogram, before);
    }
}
