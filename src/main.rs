use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bifurcation_explorer::{CliController, FidelityMode, PpmFilePresenter, RenderSettings};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Interactive,
    Progressive,
}

impl From<Mode> for FidelityMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Interactive => FidelityMode::Interactive,
            Mode::Progressive => FidelityMode::Progressive,
        }
    }
}

/// Render a bifurcation diagram of the logistic map to PPM.
#[derive(Debug, Parser)]
#[command(name = "bifurcation", version)]
struct Args {
    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Left edge of the r axis
    #[arg(long, allow_hyphen_values = true)]
    r_min: Option<f64>,

    /// Right edge of the r axis
    #[arg(long, allow_hyphen_values = true)]
    r_max: Option<f64>,

    /// Bottom of the x axis
    #[arg(long, allow_hyphen_values = true)]
    x_min: Option<f64>,

    /// Top of the x axis
    #[arg(long, allow_hyphen_values = true)]
    x_max: Option<f64>,

    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Iteration depth, 1 to 5
    #[arg(long)]
    detail: Option<u8>,

    /// Tone mapping contrast, 0.5 to 2.0
    #[arg(long)]
    contrast: Option<f64>,

    /// TOML settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "output/bifurcation.ppm")]
    output: PathBuf,

    /// Also write every stage as <stem>-stage<N>.ppm
    #[arg(long)]
    stages: bool,

    /// Log at debug level (-vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> anyhow::Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)?,
            None => RenderSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(r_min) = self.r_min {
            settings.viewport.r_min = r_min;
        }
        if let Some(r_max) = self.r_max {
            settings.viewport.r_max = r_max;
        }
        if let Some(x_min) = self.x_min {
            settings.viewport.x_min = x_min;
        }
        if let Some(x_max) = self.x_max {
            settings.viewport.x_max = x_max;
        }
        if let Some(mode) = self.mode {
            settings.mode = mode.into();
        }
        if let Some(detail) = self.detail {
            settings.display.detail_level = detail;
        }
        if let Some(contrast) = self.contrast {
            settings.display.contrast = contrast;
        }

        Ok(settings)
    }

    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(args.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = args.settings()?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut controller = CliController::new(PpmFilePresenter::new());
    controller.generate(settings.request())?;

    let written = controller
        .write(&args.output, args.stages)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    for path in &written {
        info!(path = %path.display(), "saved");
    }

    let views = settings.view_requests();
    if !views.is_empty() {
        controller.render_views(&views, &args.output)?;
    }

    Ok(())
}
