use std::time::Duration;

use crate::core::data::stage_frame::StageFrame;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub frame: StageFrame,
    /// Time from the start of the job to this frame.
    pub render_duration: Duration,
}
