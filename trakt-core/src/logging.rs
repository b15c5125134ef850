//! Structured logging over the `tracing` ecosystem.
//!
//! The client is a library, so nothing here is initialized implicitly:
//! the host application opts in with [`init_logging`] (console plus a
//! daily-rotated file) or [`init_console_logging`] (console only).

use std::path::{Path, PathBuf};

use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::error::{TraktError, TraktResult};

const LOG_FILE_PREFIX: &str = "trakt.log";

/// Default log directory for the current platform, alongside the cache
/// the client keeps there.
pub fn default_log_dir() -> TraktResult<PathBuf> {
    let base = dirs::cache_dir()
        .ok_or_else(|| TraktError::Config("no cache directory on this platform".into()))?;
    Ok(base.join("trakt").join("logs"))
}

/// Install the global subscriber: a compact console layer on stderr and
/// a daily-rotated file under `log_dir` (the platform default when
/// `None`). File output is plain text, or JSON when `json_output` is
/// set. `level` takes an `EnvFilter` directive string; an invalid one
/// falls back to `info`.
///
/// Returns a [`LogGuard`] that must stay alive for the lifetime of the
/// program; dropping it flushes and closes the log file. Fails if a
/// global subscriber is already installed.
pub fn init_logging(
    level: &str,
    log_dir: Option<&Path>,
    json_output: bool,
) -> TraktResult<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let file_layer = if json_output {
        fmt::layer()
            .with_writer(non_blocking)
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TraktError::Config(format!("logging already initialized: {e}")))?;

    tracing::info!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard {
        log_dir,
        _guard: guard,
    })
}

/// Keeps the non-blocking log writer alive. Drop to flush and close
/// the log file.
pub struct LogGuard {
    log_dir: PathBuf,
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl LogGuard {
    /// The directory the rotated log files are written to.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Console-only logger for tests and simple binaries. Safe to call more
/// than once; later calls are no-ops.
pub fn init_console_logging(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logging_does_not_panic() {
        // Subsequent calls are no-ops.
        init_console_logging("debug");
    }

    #[test]
    fn test_default_log_dir_is_under_trakt() {
        let dir = default_log_dir().expect("platform has a cache dir");
        assert!(dir.ends_with("trakt/logs"));
    }
}
