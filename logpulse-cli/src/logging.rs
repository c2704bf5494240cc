//! Logging initialization for the logpulse binary.
//!
//! Configures `tracing-subscriber` from the `[general]` section of
//! `LogPulseConfig`. Diagnostics go to `general.log_file` through a
//! non-blocking `tracing-appender` writer, or to stderr when no file is set.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use logpulse_core::config::{GeneralConfig, LogPulseConfig};
use logpulse_core::error::LogPulseError;

/// Where diagnostic events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file.
    File(&'a Path),
    /// Standard error.
    Stderr,
    /// Discard (used when stderr belongs to a full-screen UI).
    Discard,
}

impl<'a> LogTarget<'a> {
    /// Pick the target for `config`.
    ///
    /// `interactive` commands never log to stderr.
    pub fn resolve(config: &'a GeneralConfig, interactive: bool) -> Self {
        if !config.log_file.is_empty() {
            Self::File(Path::new(&config.log_file))
        } else if interactive {
            Self::Discard
        } else {
            Self::Stderr
        }
    }
}

/// Apply the `--log-level` flag and re-validate the configuration.
///
/// An unknown level is a configuration error, not a filter directive.
pub fn apply_level_override(
    config: &mut LogPulseConfig,
    level: Option<&str>,
) -> std::result::Result<(), LogPulseError> {
    if let Some(level) = level {
        config.general.log_level = level.to_owned();
        config.validate()?;
    }
    Ok(())
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
///
/// # Formats
///
/// * `"json"` - Machine-parseable JSON lines
/// * `"pretty"` - Human-readable multi-line output
pub fn init_tracing(config: &GeneralConfig, target: LogTarget<'_>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (writer, guard, ansi) = match target {
        LogTarget::File(path) => {
            let (writer, guard) = file_writer(path)?;
            (writer, Some(guard), false)
        }
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), None, true),
        LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), None, false),
    };

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_ansi(ansi)
                        .with_writer(writer),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
        _ => {
            return Err(anyhow::anyhow!(
                "unknown log format '{}', expected 'json' or 'pretty'",
                config.log_format
            ));
        }
    }

    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(BoxMakeWriter, WorkerGuard)> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid log file path: {}", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    Ok((BoxMakeWriter::new(non_blocking), guard))
}
