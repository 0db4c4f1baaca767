//! Structured logging for the voxel planner.
//!
//! Console output goes through `tracing-subscriber`'s fmt layer with an uptime
//! timer. When enabled in config and running a debug build, a second JSON layer
//! writes to `voxplan.log` in the log directory.

use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voxplan_config::Config;

/// Default filter when neither `RUST_LOG` nor the config supply one.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log inside the log directory.
pub const LOG_FILE_NAME: &str = "voxplan.log";

/// Builds the filter directive string: the configured level, or [`DEFAULT_FILTER`].
pub fn filter_directives(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Path of the JSON log file, if file logging applies to this run.
pub fn log_file_path(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<PathBuf> {
    let wants_file = config.is_some_and(|c| c.debug.log_to_file);
    match log_dir {
        Some(dir) if debug_build && wants_file => Some(dir.join(LOG_FILE_NAME)),
        _ => None,
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.debug.log_level`. Calling this more
/// than once panics inside `tracing-subscriber`, so hosts call it exactly once.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(path) = log_file_path(log_dir, debug_build, config)
        && let Some(dir) = path.parent()
        && std::fs::create_dir_all(dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(&path)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}
