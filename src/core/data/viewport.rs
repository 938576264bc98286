use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport r range must be positive: r_min {r_min}, r_max {r_max}")]
    InvalidRRange { r_min: f64, r_max: f64 },
    #[error("viewport x range must be positive: x_min {x_min}, x_max {x_max}")]
    InvalidXRange { x_min: f64, x_max: f64 },
}

/// Visible window of the (r, x) plane. `r` runs left to right, `x` bottom to top.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub r_min: f64,
    pub r_max: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            r_min: 2.8,
            r_max: 4.0,
            x_min: 0.1,
            x_max: 1.1,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(r_min: f64, r_max: f64, x_min: f64, x_max: f64) -> Self {
        Self {
            r_min,
            r_max,
            x_min,
            x_max,
        }
    }

    /// Rejects empty, inverted and NaN ranges.
    pub fn validate(&self) -> Result<(), ViewportError> {
        if !(self.r_max > self.r_min) {
            return Err(ViewportError::InvalidRRange {
                r_min: self.r_min,
                r_max: self.r_max,
            });
        }

        if !(self.x_max > self.x_min) {
            return Err(ViewportError::InvalidXRange {
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn r_range(&self) -> f64 {
        self.r_max - self.r_min
    }

    #[must_use]
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }
}
