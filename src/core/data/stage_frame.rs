use crate::core::data::pixel_buffer::PixelBuffer;

/// One emitted image. Once handed out the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StageFrame {
    pub pixel_buffer: PixelBuffer,
    /// Zero-based position of this frame within its job.
    pub stage: usize,
    pub is_final: bool,
    /// Histogram peak at emission; `None` for direct-draw previews.
    pub max_hits: Option<u32>,
}

impl StageFrame {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_buffer.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_buffer.height()
    }
}
