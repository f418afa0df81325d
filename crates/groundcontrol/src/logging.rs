//! Logging configuration for groundcontrol.
//!
//! Console logging goes through `tracing-subscriber` with an env-filter;
//! an optional daily-rolling file log under the data directory keeps a
//! local record of board mutations for debugging sync problems.

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to a tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Initialize the logging system.
///
/// This should be called once at startup. The console level is controlled
/// by the `verbosity` parameter, with the `RUST_LOG` environment variable
/// taking precedence. When `log_dir` is given, log lines are additionally
/// written to a daily-rolling file in that directory; the returned guard
/// must be held for the lifetime of the process so buffered lines are
/// flushed on exit.
///
/// File logging is best-effort: if the directory cannot be created the
/// console still works and a warning is emitted.
pub fn init_logging(verbosity: Verbosity, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Build the default filter based on verbosity
    let default_filter = format!("groundcontrol={}", verbosity.to_level_filter());

    // Allow RUST_LOG to override
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    // Optional rolling file layer; remember a failure so it can be
    // reported once the subscriber is installed.
    let mut file_error: Option<std::io::Error> = None;
    let (file_layer, guard) = match log_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "groundcontrol.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                file_error = Some(e);
                (None, None)
            }
        },
        None => (None, None),
    };

    // Configure the subscriber
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(file_layer);

    // Install the subscriber (ignore error if already set)
    let _ = subscriber.try_init();

    if let Some(e) = file_error {
        tracing::warn!("could not initialize file logging ({e}); continuing with console only");
    }

    guard
}

/// Initialize logging for tests.
///
/// This sets up a minimal logging configuration suitable for tests.
/// It only logs warnings and errors by default to keep test output clean.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
