//! Headless host: replays recorded UI events against the drawing surface and saves
//! exports through the storage service.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::AppConfig;
use crate::editor::DrawingSurface;
use crate::error::AppResult;
use crate::export::{ExportArtifact, ExportFormat};
use crate::input::{resolve_pointer, PointerAction, PointerEvent, PointerKind, Script, SurfaceCommand};
use crate::storage::ExportStorage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub commands: usize,
    pub rejected: usize,
    pub saved: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct App {
    surface: DrawingSurface,
}

impl App {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let surface = DrawingSurface::new(config.canvas_width, config.canvas_height)?
            .with_style(config.style)
            .with_jpeg_quality(config.jpeg_quality)?;
        Ok(Self { surface })
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn replay<S: ExportStorage>(
        &mut self,
        script: &Script,
        storage: &S,
    ) -> AppResult<ReplayReport> {
        if script.width.is_some() || script.height.is_some() {
            let width = script.width.unwrap_or(self.surface.width());
            let height = script.height.unwrap_or(self.surface.height());
            self.surface.initialize(width, height)?;
        }

        let mut report = ReplayReport::default();
        for command in &script.commands {
            report.commands += 1;
            if !self.apply(command, storage, &mut report)? {
                report.rejected += 1;
            }
        }

        tracing::info!(
            commands = report.commands,
            rejected = report.rejected,
            saved = report.saved.len(),
            "script replayed"
        );
        Ok(report)
    }

    /// Runs one command. Returns `Ok(false)` when the surface rejected its input.
    pub fn apply<S: ExportStorage>(
        &mut self,
        command: &SurfaceCommand,
        storage: &S,
        report: &mut ReplayReport,
    ) -> AppResult<bool> {
        let style_result = match command {
            SurfaceCommand::PointerDown { x, y } => {
                self.dispatch_pointer(PointerEvent::new(PointerKind::Down, *x, *y));
                Ok(())
            }
            SurfaceCommand::PointerMove { x, y } => {
                self.dispatch_pointer(PointerEvent::new(PointerKind::Move, *x, *y));
                Ok(())
            }
            SurfaceCommand::PointerUp => {
                self.dispatch_pointer(PointerEvent::new(PointerKind::Up, 0.0, 0.0));
                Ok(())
            }
            SurfaceCommand::PointerLeave => {
                self.dispatch_pointer(PointerEvent::new(PointerKind::Leave, 0.0, 0.0));
                Ok(())
            }
            SurfaceCommand::SetTool { tool } => self.surface.set_tool_name(tool),
            SurfaceCommand::SetBrushWidth { width } => self.surface.set_brush_width(*width),
            SurfaceCommand::SetColor { color } => self.surface.set_color_str(color),
            SurfaceCommand::SetFill { fill } => {
                self.surface.set_fill_mode(*fill);
                Ok(())
            }
            SurfaceCommand::Clear => {
                self.surface.clear();
                Ok(())
            }
            SurfaceCommand::Resize { width, height } => {
                self.surface.initialize(*width, *height)?;
                Ok(())
            }
            SurfaceCommand::Export { format } => {
                let format = match format.parse::<ExportFormat>() {
                    Ok(format) => format,
                    Err(err) => {
                        tracing::warn!(%err, "export request rejected");
                        return Ok(false);
                    }
                };
                let path = self.export_to(format, storage)?;
                report.saved.push(path);
                Ok(())
            }
        };

        match style_result {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::warn!(%err, ?command, "style change rejected");
                Ok(false)
            }
        }
    }

    pub fn export_to<S: ExportStorage>(
        &self,
        format: ExportFormat,
        storage: &S,
    ) -> AppResult<PathBuf> {
        let bytes = self.surface.export_raster(format)?;
        let artifact = ExportArtifact::new(format, bytes, SystemTime::now())?;
        Ok(storage.save_export(&artifact)?)
    }

    fn dispatch_pointer(&mut self, event: PointerEvent) {
        match resolve_pointer(event, self.surface.raster().bounds()) {
            PointerAction::Begin(point) => {
                self.surface.begin_stroke(point.x, point.y);
            }
            PointerAction::Continue(point) => {
                self.surface.continue_stroke(point.x, point.y);
            }
            PointerAction::End => {
                self.surface.end_stroke();
            }
            PointerAction::Ignore => {
                tracing::trace!(?event, "pointer event outside surface dropped");
            }
        }
    }
}

/// Paths resolved by the binary before replaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub script: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn resolve_output_dir(options: &RunOptions, config: &AppConfig) -> Option<PathBuf> {
    options
        .output_dir
        .clone()
        .or_else(|| config.export_dir.clone())
}

pub fn load_config(config: Option<&Path>) -> AppConfig {
    match config {
        Some(path) => crate::config::load_app_config_from(path),
        None => crate::config::load_app_config(),
    }
}
