pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod raster;
pub mod state;
pub mod storage;
pub use error::{AppError, AppResult};

use app::{ReplayReport, RunOptions};
use storage::StorageService;

/// Entrypoint used by the CLI binding: replays a script and saves its exports.
pub fn run(options: &RunOptions) -> AppResult<ReplayReport> {
    logging::init();
    tracing::info!(script = %options.script.display(), "starting paintboard");

    let config = app::load_config(options.config.as_deref());
    let storage = match app::resolve_output_dir(options, &config) {
        Some(dir) => StorageService::with_output_dir(dir),
        None => StorageService::with_default_paths()?,
    };
    let script = input::load_script(&options.script)?;

    let mut app = app::App::new(&config)?;
    let report = app.replay(&script, &storage)?;

    tracing::info!(
        output_dir = %storage.output_dir().display(),
        state = ?app.surface().stroke_state(),
        "replay complete"
    );
    Ok(report)
}
