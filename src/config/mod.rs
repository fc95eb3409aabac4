use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::editor::{Color, ToolKind, ToolStyle};
use crate::export::{self, DEFAULT_JPEG_QUALITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "paintboard";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_CANVAS_WIDTH: u32 = 800;
const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Raw `config.json` contents. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawAppConfig {
    #[serde(default)]
    canvas_width: Option<u32>,
    #[serde(default)]
    canvas_height: Option<u32>,
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    brush_width: Option<i64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    fill: Option<bool>,
    #[serde(default)]
    jpeg_quality: Option<u8>,
    #[serde(default)]
    export_dir: Option<PathBuf>,
}

/// Host defaults resolved from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub style: ToolStyle,
    pub jpeg_quality: u8,
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            style: ToolStyle::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Applies raw values field by field; an invalid value keeps that field's default.
    fn from_raw(raw: RawAppConfig) -> Self {
        let mut config = Self::default();

        match raw.canvas_width.filter(|width| *width > 0) {
            Some(width) => config.canvas_width = width,
            None if raw.canvas_width.is_some() => {
                tracing::warn!("canvas_width must be positive; using default");
            }
            None => {}
        }
        match raw.canvas_height.filter(|height| *height > 0) {
            Some(height) => config.canvas_height = height,
            None if raw.canvas_height.is_some() => {
                tracing::warn!("canvas_height must be positive; using default");
            }
            None => {}
        }

        if let Some(tool) = raw.tool {
            match tool.parse::<ToolKind>() {
                Ok(tool) => config.style.set_tool(tool),
                Err(err) => tracing::warn!(%err, "ignoring configured tool"),
            }
        }
        if let Some(width) = raw.brush_width {
            if let Err(err) = config.style.set_brush_width(width) {
                tracing::warn!(%err, "ignoring configured brush width");
            }
        }
        if let Some(color) = raw.color {
            match color.parse::<Color>() {
                Ok(color) => config.style.set_color(color),
                Err(err) => tracing::warn!(%err, "ignoring configured color"),
            }
        }
        if let Some(fill) = raw.fill {
            config.style.set_fill(fill);
        }
        if let Some(quality) = raw.jpeg_quality {
            match export::validate_jpeg_quality(quality) {
                Ok(quality) => config.jpeg_quality = quality,
                Err(err) => tracing::warn!(%err, "ignoring configured jpeg quality"),
            }
        }
        config.export_dir = raw.export_dir;
        config
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    load_app_config_from(&path)
}

pub fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<RawAppConfig>(&contents) {
            Ok(raw) => AppConfig::from_raw(raw),
            Err(err) => {
                tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
                AppConfig::default()
            }
        },
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
