//! Log setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the interface while the application runs, so
//! events are only written when a log file is configured. Without one no
//! subscriber is installed and events are discarded.
//!
//! # Log Levels
//!
//! - `error`: Course load failures
//! - `warn`: Ignored inputs (unknown categories, disabled submits)
//! - `info`: Catalog loaded, registration lifecycle
//! - `debug`: Filter, sort and page changes
//! - `trace`: Everything else

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Destination file; `None` disables logging
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// - 0: info
    /// - 1: debug
    /// - 2+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8, log_file: Option<PathBuf>) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self { level, log_file }
    }

    /// Filter directives: `RUST_LOG` when set, otherwise the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
    }
}

/// Installs the global subscriber. Returns whether logging is active.
///
/// # Errors
///
/// Returns an IO error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    let file = open_log_file(path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    Ok(installed)
}

fn open_log_file(path: &Path) -> io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}
