//! Tracing setup.
//!
//! The interactive form owns the terminal, so log output goes to a daily
//! rolling file instead of stderr.

use std::fs;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "ONDUTY_LOG";

const LOG_FILE_PREFIX: &str = "onduty.log";

/// Installs the global subscriber.
///
/// The returned guard flushes buffered records on drop; keep it alive for
/// the whole process.
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    let dir = config.effective_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// `ONDUTY_LOG` wins; otherwise the configured level; `info` when that is
/// not a valid directive.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
