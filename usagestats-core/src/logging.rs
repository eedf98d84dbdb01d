use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "usagestats.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// This function sets up the logging infrastructure using tracing-subscriber:
/// - Uses environment variables for log level filtering (defaults to "info" if not set)
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
pub fn init_stdout_logging() {
    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .init();
}

/// Same format as [`init_stdout_logging`], written to a daily rolling file in `dir`.
///
/// Logs are flushed by a background worker until the returned guard is dropped.
pub fn init_file_logging(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .init();

    guard
}

pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    match log_dir {
        Some(dir) => Some(init_file_logging(dir)),
        None => {
            init_stdout_logging();
            None
        }
    }
}
