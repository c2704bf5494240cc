//! CLI-specific error types and exit code mapping

use logpulse_analyzer::AnalyzerError;
use logpulse_core::error::LogPulseError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The log source could not be read or lacks required columns.
    #[error("{0}")]
    Source(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, terminal setup, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logpulse-core.
    #[error("{0}")]
    Core(LogPulseError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                      |
    /// |------|------------------------------|
    /// | 0    | Success                      |
    /// | 1    | General / command error      |
    /// | 2    | Configuration error          |
    /// | 3    | Log source unavailable       |
    /// | 10   | IO error                     |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(LogPulseError::Config(_)) => 2,
            Self::Source(_) | Self::Core(LogPulseError::Source(_)) => 3,
            Self::Io(_) | Self::Core(LogPulseError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<LogPulseError> for CliError {
    fn from(e: LogPulseError) -> Self {
        Self::Core(e)
    }
}

impl From<AnalyzerError> for CliError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Source(source) => Self::Source(source.to_string()),
            AnalyzerError::Config { .. } => Self::Config(e.to_string()),
            AnalyzerError::Report { .. } => Self::Command(e.to_string()),
        }
    }
}
