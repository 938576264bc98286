use crate::core::actions::cancellation::{
    CancelToken, Cancelled, NeverCancel, CANCEL_CHECK_INTERVAL_PIXELS,
};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{
    PixelBuffer, PixelBufferData, PixelBufferError, BYTES_PER_PIXEL,
};
use thiserror::Error;

/// Error type for cancelable pixel buffer generation.
///
/// Cancellation is expected control flow and callers should drop it quietly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratePixelBufferError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Colours a row-major grid of values into a fresh RGBA buffer.
///
/// For cancel-aware generation, use [`generate_pixel_buffer_cancelable`].
pub fn generate_pixel_buffer<T, CMap>(
    input: &[T],
    mapper: &CMap,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, PixelBufferError>
where
    T: Copy,
    CMap: ColourMap<T>,
{
    generate_pixel_buffer_cancelable(input, mapper, width, height, &NeverCancel).map_err(
        |e| match e {
            GeneratePixelBufferError::PixelBuffer(err) => err,
            GeneratePixelBufferError::Cancelled(_) => {
                unreachable!("NeverCancel token should never signal cancellation")
            }
        },
    )
}

/// Like [`generate_pixel_buffer`], but checks `cancel` every
/// [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels and gives up early when it fires.
///
/// The input is only borrowed, so a histogram can keep accumulating after
/// an intermediate image has been produced from it.
pub fn generate_pixel_buffer_cancelable<T, CMap, C>(
    input: &[T],
    mapper: &CMap,
    width: u32,
    height: u32,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    T: Copy,
    CMap: ColourMap<T>,
    C: CancelToken,
{
    let mut buffer: PixelBufferData = Vec::with_capacity(input.len() * BYTES_PER_PIXEL);

    for (i, &value) in input.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 {
            cancel.check()?;
        }

        let Colour { r, g, b, a } = mapper.map(value);
        buffer.extend_from_slice(&[r, g, b, a]);
    }

    Ok(PixelBuffer::from_data(width, height, buffer)?)
}
