//! Tracing subscriber setup.
//!
//! The interactive form owns the terminal, so it never logs to stderr: with
//! `--debug` everything goes to a file, otherwise logging is off. Headless
//! commands log to stderr at the configured level.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;

/// File written by `--debug`, relative to the working directory.
pub const DEBUG_LOG_FILE: &str = "predictor-debug.log";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Trace-level records to a file.
    File(PathBuf),
    /// Filtered records to stderr.
    Stderr,
    Off,
}

/// Pick the sink for a run.
pub fn log_target(debug: bool, headless: bool) -> LogTarget {
    if debug {
        LogTarget::File(PathBuf::from(DEBUG_LOG_FILE))
    } else if headless {
        LogTarget::Stderr
    } else {
        LogTarget::Off
    }
}

/// Keeps the background writer alive; dropping it flushes pending records.
#[must_use]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` for stderr output.
pub fn init(target: &LogTarget, config: &LoggingConfig) -> Result<LogGuard> {
    match target {
        LogTarget::File(path) => init_file(path),
        LogTarget::Stderr => {
            init_stderr(config);
            Ok(LogGuard { _guard: None })
        }
        LogTarget::Off => Ok(LogGuard { _guard: None }),
    }
}

fn init_file(path: &Path) -> Result<LogGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("trace"))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .try_init();

    tracing::info!(path = %path.display(), "debug logging enabled");
    Ok(LogGuard {
        _guard: Some(guard),
    })
}

fn init_stderr(config: &LoggingConfig) {
    let filter = filter_for(&config.level);

    // try_init: a subscriber may already be set in tests.
    if config.json {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init();
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_target_selection() {
        assert_eq!(
            log_target(true, false),
            LogTarget::File(PathBuf::from(DEBUG_LOG_FILE))
        );
        assert_eq!(
            log_target(true, true),
            LogTarget::File(PathBuf::from(DEBUG_LOG_FILE))
        );
        assert_eq!(log_target(false, true), LogTarget::Stderr);
        assert_eq!(log_target(false, false), LogTarget::Off);
    }

    #[test]
    fn test_file_target_creates_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let guard = init(&LogTarget::File(path.clone()), &LoggingConfig::default()).unwrap();
        drop(guard);
        assert!(path.exists());
    }

    #[test]
    fn test_off_target_has_no_writer() {
        let guard = init(&LogTarget::Off, &LoggingConfig::default()).unwrap();
        assert!(guard._guard.is_none());
    }
}
