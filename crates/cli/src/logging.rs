//! Logging setup: a log file per run directory, optionally mirrored to stderr.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::CliConfig;

const LOG_FILE: &str = "hdc.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the whole run.
pub fn setup_logging(config: &CliConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {}", config.log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter: {}", config.log_filter))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = config.log_to_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Log file: {}", config.log_dir.join(LOG_FILE).display());
    Ok(guard)
}
