use crate::core::data::viewport::{Viewport, ViewportError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_DETAIL_LEVEL: u8 = 1;
pub const MAX_DETAIL_LEVEL: u8 = 5;
pub const MIN_CONTRAST: f64 = 0.5;
pub const MAX_CONTRAST: f64 = 2.0;

const DEFAULT_DETAIL_LEVEL: u8 = 2;
const DEFAULT_CONTRAST: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum InvalidRequest {
    #[error("pixel dimensions must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityMode {
    /// Single cheap pass for a view that is still being dragged.
    Interactive,
    /// Two-stage histogram render for a settled view.
    #[default]
    Progressive,
}

/// User-facing display options. The axis and label toggles belong to the
/// overlay layer and are carried through untouched.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub detail_level: u8,
    pub contrast: f64,
    pub show_axes: bool,
    pub show_labels: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            detail_level: DEFAULT_DETAIL_LEVEL,
            contrast: DEFAULT_CONTRAST,
            show_axes: true,
            show_labels: false,
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn effective_detail_level(&self) -> u8 {
        self.detail_level.clamp(MIN_DETAIL_LEVEL, MAX_DETAIL_LEVEL)
    }

    #[must_use]
    pub fn effective_contrast(&self) -> f64 {
        if self.contrast.is_nan() {
            return DEFAULT_CONTRAST;
        }
        self.contrast.clamp(MIN_CONTRAST, MAX_CONTRAST)
    }
}

/// Everything needed for one render job.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    pub viewport: Viewport,
    pub mode: FidelityMode,
    pub display: DisplayConfig,
}

impl RenderRequest {
    #[must_use]
    pub fn new(width: u32, height: u32, viewport: Viewport, mode: FidelityMode) -> Self {
        Self {
            width,
            height,
            viewport,
            mode,
            display: DisplayConfig::default(),
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.width == 0 || self.height == 0 {
            return Err(InvalidRequest::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        self.viewport.validate()?;

        Ok(())
    }
}
