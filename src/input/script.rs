use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One host event. Setter payloads stay as raw values so an invalid entry is rejected
/// by the surface at replay time instead of failing the whole script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceCommand {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    SetTool { tool: String },
    SetBrushWidth { width: i64 },
    SetColor { color: String },
    SetFill { fill: bool },
    Clear,
    Resize { width: u32, height: u32 },
    Export { format: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub commands: Vec<SurfaceCommand>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

pub type ScriptResult<T> = std::result::Result<T, ScriptError>;

pub fn parse_script(contents: &str) -> ScriptResult<Script> {
    serde_json::from_str(contents).map_err(|source| ScriptError::Parse { source })
}

pub fn load_script(path: &Path) -> ScriptResult<Script> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&contents)
}
