mod adapters;
mod controllers;
mod core;
mod presenters;

pub use crate::controllers::cli::controller::{stage_path, view_path, CliController, CliError};
pub use crate::controllers::cli::settings::{ConfigError, NamedView, RenderSettings};
pub use crate::controllers::interactive::data::frame_data::FrameData;
pub use crate::controllers::interactive::errors::render::RenderFailure;
pub use crate::controllers::interactive::events::render::RenderEvent;
pub use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
pub use crate::controllers::interactive::InteractiveController;
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::render::render::{
    render, render_cancelable, RenderError, RenderStages,
};
pub use crate::core::actions::render_batch::render_batch::{
    render_batch, render_batch_cancelable, BatchRenderError,
};
pub use crate::core::actions::tone_map::tone_map::tone_map;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::hit_histogram::HitHistogram;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::render_request::{
    DisplayConfig, FidelityMode, InvalidRequest, RenderRequest,
};
pub use crate::core::data::stage_frame::StageFrame;
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::logistic::iteration_budget::IterationBudget;
pub use crate::presenters::file::ppm::PpmFilePresenter;
