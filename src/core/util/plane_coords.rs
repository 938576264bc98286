use crate::core::data::viewport::Viewport;

/// Lowest r that gets iterated.
pub const R_SAFETY_MIN: f64 = -2.0;
/// Highest r that gets iterated.
pub const R_SAFETY_MAX: f64 = 4.01;

#[inline]
#[must_use]
pub fn r_at_column(column: u32, width: u32, viewport: &Viewport) -> f64 {
    viewport.r_min + (f64::from(column) / f64::from(width)) * viewport.r_range()
}

/// Maps a state onto a pixel row, `x_max` at the top. `None` when the row
/// falls outside `[0, height)`, which includes NaN states.
#[inline]
#[must_use]
pub fn row_for_state(x: f64, height: u32, viewport: &Viewport) -> Option<u32> {
    let height_f = f64::from(height);
    let row = (height_f - ((x - viewport.x_min) / viewport.x_range()) * height_f).floor();

    if row >= 0.0 && row < height_f {
        Some(row as u32)
    } else {
        None
    }
}

/// Columns whose r falls outside the band are never iterated.
#[inline]
#[must_use]
pub fn in_safety_band(r: f64) -> bool {
    (R_SAFETY_MIN..=R_SAFETY_MAX).contains(&r)
}
