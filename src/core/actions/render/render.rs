use std::mem;
use std::time::Instant;

use crate::core::actions::accumulate_hits::accumulate_hits::{
    accumulate_first_stage, accumulate_second_stage,
};
use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::GeneratePixelBufferError;
use crate::core::actions::sweep_preview::sweep_preview::{sweep_preview, SweepPreviewError};
use crate::core::actions::tone_map::tone_map::tone_map_cancelable;
use crate::core::data::column_checkpoints::ColumnCheckpoints;
use crate::core::data::hit_histogram::HitHistogram;
use crate::core::data::pixel_buffer::PixelBufferError;
use crate::core::data::render_request::{FidelityMode, InvalidRequest, RenderRequest};
use crate::core::data::stage_frame::StageFrame;
use crate::core::logistic::iteration_budget::IterationBudget;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

impl From<SweepPreviewError> for RenderError {
    fn from(err: SweepPreviewError) -> Self {
        match err {
            SweepPreviewError::Cancelled(c) => Self::Cancelled(c),
            SweepPreviewError::PixelBuffer(e) => Self::PixelBuffer(e),
        }
    }
}

impl From<GeneratePixelBufferError> for RenderError {
    fn from(err: GeneratePixelBufferError) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(c) => Self::Cancelled(c),
            GeneratePixelBufferError::PixelBuffer(e) => Self::PixelBuffer(e),
        }
    }
}

/// Histogram state carried from stage 1 into stage 2.
#[derive(Debug)]
struct ProgressiveJob {
    histogram: HitHistogram,
    checkpoints: ColumnCheckpoints,
    budget: IterationBudget,
}

#[derive(Debug)]
enum PendingStage {
    Preview,
    FirstPass,
    SecondPass(Box<ProgressiveJob>),
    Done,
}

/// Lazily computed frames of one render job.
///
/// Each call to `next` runs exactly one stage. Interactive jobs yield a single
/// final frame; progressive jobs yield a stage 1 frame and then a final stage 2
/// frame drawn from the same, further accumulated histogram. After a final
/// frame or an error the iterator is exhausted.
#[derive(Debug)]
pub struct RenderStages<C: CancelToken = NeverCancel> {
    request: RenderRequest,
    cancel: C,
    pending: PendingStage,
    stage: usize,
}

/// Starts a job that can't be cancelled.
pub fn render(request: RenderRequest) -> Result<RenderStages<NeverCancel>, InvalidRequest> {
    render_cancelable(request, NeverCancel)
}

/// Validates `request` and prepares its stages. No sweeping happens until the
/// first frame is pulled.
pub fn render_cancelable<C: CancelToken>(
    request: RenderRequest,
    cancel: C,
) -> Result<RenderStages<C>, InvalidRequest> {
    request.validate()?;

    let pending = match request.mode {
        FidelityMode::Interactive => PendingStage::Preview,
        FidelityMode::Progressive => PendingStage::FirstPass,
    };

    Ok(RenderStages {
        request,
        cancel,
        pending,
        stage: 0,
    })
}

impl<C: CancelToken> RenderStages<C> {
    #[must_use]
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    fn run_preview(&mut self) -> Result<StageFrame, RenderError> {
        let RenderRequest {
            width,
            height,
            viewport,
            ..
        } = self.request;

        let pixel_buffer = sweep_preview(width, height, &viewport, &self.cancel)?;

        Ok(StageFrame {
            pixel_buffer,
            stage: self.stage,
            is_final: true,
            max_hits: None,
        })
    }

    fn run_first_pass(&mut self) -> Result<StageFrame, RenderError> {
        let RenderRequest {
            width,
            height,
            viewport,
            display,
            ..
        } = self.request;

        let budget = IterationBudget::for_view(&viewport, display.effective_detail_level());
        debug!(
            skip = budget.skip,
            plot_stage1 = budget.plot_stage1,
            plot_stage2 = budget.plot_stage2,
            width,
            height,
            "progressive budget"
        );

        let mut histogram = HitHistogram::new(width, height);
        let mut checkpoints = ColumnCheckpoints::new(width);
        accumulate_first_stage(
            &mut histogram,
            &mut checkpoints,
            &viewport,
            &budget,
            &self.cancel,
        )?;
        trace!(
            resumable = checkpoints.resumable_count(),
            columns = checkpoints.len(),
            "stage 1 checkpoints"
        );

        let pixel_buffer =
            tone_map_cancelable(&histogram, display.effective_contrast(), &self.cancel)?;
        let max_hits = histogram.max_hits();

        self.pending = PendingStage::SecondPass(Box::new(ProgressiveJob {
            histogram,
            checkpoints,
            budget,
        }));

        Ok(StageFrame {
            pixel_buffer,
            stage: self.stage,
            is_final: false,
            max_hits: Some(max_hits),
        })
    }

    fn run_second_pass(&mut self, mut job: ProgressiveJob) -> Result<StageFrame, RenderError> {
        let viewport = self.request.viewport;
        let contrast = self.request.display.effective_contrast();

        accumulate_second_stage(
            &mut job.histogram,
            &mut job.checkpoints,
            &viewport,
            &job.budget,
            &self.cancel,
        )?;
        trace!(
            resumable = job.checkpoints.resumable_count(),
            columns = job.checkpoints.len(),
            "stage 2 checkpoints"
        );

        let pixel_buffer = tone_map_cancelable(&job.histogram, contrast, &self.cancel)?;

        Ok(StageFrame {
            pixel_buffer,
            stage: self.stage,
            is_final: true,
            max_hits: Some(job.histogram.max_hits()),
        })
    }
}

impl<C: CancelToken> Iterator for RenderStages<C> {
    type Item = Result<StageFrame, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = Instant::now();

        let result = match mem::replace(&mut self.pending, PendingStage::Done) {
            PendingStage::Done => return None,
            PendingStage::Preview => self.run_preview(),
            PendingStage::FirstPass => self.run_first_pass(),
            PendingStage::SecondPass(job) => self.run_second_pass(*job),
        };

        debug!(
            stage = self.stage,
            mode = ?self.request.mode,
            elapsed_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "render stage finished"
        );
        self.stage += 1;

        Some(result)
    }
}

impl<C: CancelToken> std::iter::FusedIterator for RenderStages<C> {}
