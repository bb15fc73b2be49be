//! tracing setup: stdout output plus an optional daily rolling log file

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::ClientConfig;

const LOG_FILE_PREFIX: &str = "slovo";
const LOG_FILE_SUFFIX: &str = "log";

/// Keeps the non-blocking file writer alive; drop flushes it
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Installation failures go to stderr and never stop the client
pub fn init_tracing(config: &ClientConfig) -> Option<FileLogGuard> {
    match try_init_tracing(config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("tracing subscriber not installed: {err}");
            None
        }
    }
}

/// Fails when a global subscriber is already set
pub fn try_init_tracing(config: &ClientConfig) -> Result<Option<FileLogGuard>, TryInitError> {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_writer, guard) = match open_log_file(config) {
        Some((writer, guard)) => (Some(writer), Some(FileLogGuard { _guard: guard })),
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

fn open_log_file(config: &ClientConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !config.file_logs {
        return None;
    }
    let log_dir = &config.log_dir;
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {err}", log_dir.display());
        return None;
    }
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir);
    match appender {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    }
}
