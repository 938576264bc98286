use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::viewport::Viewport;
use crate::core::logistic::orbit::{iterate, INITIAL_STATE};
use crate::core::util::plane_coords::{in_safety_band, r_at_column, row_for_state};
use thiserror::Error;

/// Only every `PREVIEW_STRIDE`th column is iterated; its strokes are copied
/// across the group.
pub const PREVIEW_STRIDE: u32 = 3;
pub const PREVIEW_SKIP_STEPS: usize = 300;
pub const PREVIEW_PLOT_STEPS: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepPreviewError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Cheap single-pass render for a view that is still moving.
///
/// Iterates every [`PREVIEW_STRIDE`]th column from [`INITIAL_STATE`], discards
/// a short transient and draws the next few iterates straight into the image
/// in the accent colour. Columns of a stride group whose own r is outside the
/// safety band are left as background.
pub fn sweep_preview<C: CancelToken>(
    width: u32,
    height: u32,
    viewport: &Viewport,
    cancel: &C,
) -> Result<PixelBuffer, SweepPreviewError> {
    let mut buffer = PixelBuffer::filled(width, height, Colour::BACKGROUND);
    let mut group = Vec::with_capacity(PREVIEW_STRIDE as usize);

    for column in (0..width).step_by(PREVIEW_STRIDE as usize) {
        cancel.check()?;

        let r = r_at_column(column, width, viewport);
        if !in_safety_band(r) {
            continue;
        }

        let mut transient = iterate(r, INITIAL_STATE, PREVIEW_SKIP_STEPS);
        transient.exhaust();
        if transient.escaped() {
            continue;
        }

        group.clear();
        group.extend(
            (column..column.saturating_add(PREVIEW_STRIDE).min(width))
                .filter(|&c| in_safety_band(r_at_column(c, width, viewport))),
        );

        for x in transient.resume(PREVIEW_PLOT_STEPS) {
            let Some(row) = row_for_state(x, height, viewport) else {
                continue;
            };

            for &target in &group {
                buffer.set_pixel(target, row, Colour::ACCENT)?;
            }
        }
    }

    Ok(buffer)
}
