#![forbid(unsafe_code)]

//! File logging.
//!
//! The terminal belongs to the renderer, so log output only goes to a file
//! named on the command line. Without one no subscriber is installed and
//! every `tracing` call is a no-op.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "LORENZ_LOG";

/// Directive used when `LORENZ_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Build the filter from raw directives, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a global fmt subscriber appending to `log_file`.
///
/// Returns `Ok(false)` when no file was given.
pub fn init(log_file: Option<&Path>) -> io::Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)?;
    tracing::info!(path = ?path, "logging initialized");
    Ok(true)
}
