use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::render::render::{render_cancelable, RenderError};
use crate::core::data::render_request::{InvalidRequest, RenderRequest};
use crate::core::data::stage_frame::StageFrame;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchRenderError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Renders independent requests on rayon's pool, one job per request.
///
/// Every job runs single-threaded with its own histogram and buffers, so the
/// frames are identical to rendering each request on its own. Results come
/// back in request order; a bad request only fails its own slot.
pub fn render_batch(requests: &[RenderRequest]) -> Vec<Result<Vec<StageFrame>, BatchRenderError>> {
    render_batch_cancelable(requests, &NeverCancel)
}

/// Like [`render_batch`], with one token shared by every job.
pub fn render_batch_cancelable<C: CancelToken>(
    requests: &[RenderRequest],
    cancel: &C,
) -> Vec<Result<Vec<StageFrame>, BatchRenderError>> {
    debug!(jobs = requests.len(), "rendering batch");

    requests
        .par_iter()
        .map(|request| -> Result<Vec<StageFrame>, BatchRenderError> {
            let stages = render_cancelable(*request, || cancel.is_cancelled())?;
            let frames = stages.collect::<Result<Vec<_>, _>>()?;
            Ok(frames)
        })
        .collect()
}
