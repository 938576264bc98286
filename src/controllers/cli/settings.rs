use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::data::render_request::{DisplayConfig, FidelityMode, RenderRequest};
use crate::core::data::viewport::Viewport;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid view name {name:?} in {path}: must be a plain file name fragment")]
    InvalidViewName { path: PathBuf, name: String },
}

/// An extra view rendered alongside the main one, written to
/// `<stem>-<name>.ppm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedView {
    pub name: String,
    #[serde(flatten)]
    pub viewport: Viewport,
    /// Falls back to the main render's mode.
    #[serde(default)]
    pub mode: Option<FidelityMode>,
}

/// Contents of a settings file. Every field is optional in the file.
///
/// ```toml
/// width = 1200
/// mode = "progressive"
///
/// [viewport]
/// r_min = 3.4
/// r_max = 4.0
///
/// [display]
/// contrast = 1.5
///
/// [[views]]
/// name = "period-3-window"
/// r_min = 3.82
/// r_max = 3.86
/// x_min = 0.0
/// x_max = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub mode: FidelityMode,
    pub viewport: Viewport,
    pub display: DisplayConfig,
    pub views: Vec<NamedView>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mode: FidelityMode::default(),
            viewport: Viewport::default(),
            display: DisplayConfig::default(),
            views: Vec::new(),
        }
    }
}

impl RenderSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(view) = settings.views.iter().find(|view| !is_plain_name(&view.name)) {
            return Err(ConfigError::InvalidViewName {
                path: path.to_path_buf(),
                name: view.name.clone(),
            });
        }

        Ok(settings)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    #[must_use]
    pub fn request(&self) -> RenderRequest {
        RenderRequest::new(self.width, self.height, self.viewport, self.mode)
            .with_display(self.display)
    }

    /// Requests for the extra views, sharing size and display options with the
    /// main render.
    #[must_use]
    pub fn view_requests(&self) -> Vec<(String, RenderRequest)> {
        self.views
            .iter()
            .map(|view| {
                let request = RenderRequest::new(
                    self.width,
                    self.height,
                    view.viewport,
                    view.mode.unwrap_or(self.mode),
                )
                .with_display(self.display);
                (view.name.clone(), request)
            })
            .collect()
    }
}

/// View names are spliced into output file names.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
