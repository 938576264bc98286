use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::render::render::{render, RenderError};
use crate::core::actions::render_batch::render_batch::{render_batch, BatchRenderError};
use crate::core::data::render_request::{InvalidRequest, RenderRequest};
use crate::core::data::stage_frame::StageFrame;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequest),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("view {name}: {source}")]
    View {
        name: String,
        source: BatchRenderError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// `frame.ppm` becomes `frame-stage1.ppm` for stage index 0.
#[must_use]
pub fn stage_path(filepath: &Path, stage: usize) -> PathBuf {
    suffixed_path(filepath, &format!("stage{}", stage + 1))
}

/// `frame.ppm` becomes `frame-<name>.ppm`.
#[must_use]
pub fn view_path(filepath: &Path, name: &str) -> PathBuf {
    suffixed_path(filepath, name)
}

fn suffixed_path(filepath: &Path, suffix: &str) -> PathBuf {
    let stem = filepath
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = filepath
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ppm".to_string());

    filepath.with_file_name(format!("{}-{}.{}", stem, suffix, extension))
}

/// Renders one request to completion and writes its frames through a file
/// presenter.
pub struct CliController<P: FilePresenterPort> {
    presenter: P,
    frames: Vec<StageFrame>,
}

impl<P: FilePresenterPort> CliController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            frames: Vec::new(),
        }
    }

    /// Runs every stage of `request`, keeping all frames.
    pub fn generate(&mut self, request: RenderRequest) -> Result<(), CliError> {
        info!(
            width = request.width,
            height = request.height,
            mode = ?request.mode,
            r_min = request.viewport.r_min,
            r_max = request.viewport.r_max,
            "rendering bifurcation diagram"
        );

        self.frames.clear();
        let start = Instant::now();

        for frame in render(request)? {
            let frame = frame?;
            info!(
                stage = frame.stage + 1,
                is_final = frame.is_final,
                max_hits = ?frame.max_hits,
                elapsed = ?start.elapsed(),
                "stage done"
            );
            self.frames.push(frame);
        }

        Ok(())
    }

    #[must_use]
    pub fn frames(&self) -> &[StageFrame] {
        &self.frames
    }

    /// Writes the final frame to `filepath`, plus every stage next to it when
    /// `write_stages` is set. Returns the paths written.
    pub fn write(
        &self,
        filepath: impl AsRef<Path>,
        write_stages: bool,
    ) -> std::io::Result<Vec<PathBuf>> {
        let filepath = filepath.as_ref();
        let mut written = Vec::new();

        if write_stages {
            for frame in &self.frames {
                let path = stage_path(filepath, frame.stage);
                self.presenter.present(&frame.pixel_buffer, &path)?;
                written.push(path);
            }
        }

        if let Some(frame) = self.frames.last() {
            self.presenter.present(&frame.pixel_buffer, filepath)?;
            written.push(filepath.to_path_buf());
        }

        Ok(written)
    }

    /// Renders the named views concurrently and writes each final frame to
    /// [`view_path`].
    pub fn render_views(
        &self,
        views: &[(String, RenderRequest)],
        filepath: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>, CliError> {
        let filepath = filepath.as_ref();
        let requests: Vec<RenderRequest> = views.iter().map(|(_, request)| *request).collect();

        info!(views = views.len(), "rendering extra views");
        let results = render_batch(&requests);

        let mut written = Vec::with_capacity(views.len());
        for ((name, _), result) in views.iter().zip(results) {
            let frames = result.map_err(|source| CliError::View {
                name: name.clone(),
                source,
            })?;

            if let Some(frame) = frames.last() {
                let path = view_path(filepath, name);
                self.presenter.present(&frame.pixel_buffer, &path)?;
                info!(view = %name, path = %path.display(), "view written");
                written.push(path);
            }
        }

        Ok(written)
    }
}
