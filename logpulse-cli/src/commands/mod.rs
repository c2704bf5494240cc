//! Command handlers, one module per subcommand

pub mod analyze;
pub mod chart;
pub mod config;
pub mod dashboard;

use std::path::PathBuf;

use logpulse_analyzer::{Analysis, Analyzer, LogSource};
use logpulse_core::config::LogPulseConfig;

use crate::cli::SourceArgs;
use crate::error::CliError;

/// Resolve the input path: `--file` wins over `analysis.source_path`.
pub(crate) fn source_path(file: Option<&PathBuf>, config: &LogPulseConfig) -> PathBuf {
    file.cloned()
        .unwrap_or_else(|| PathBuf::from(&config.analysis.source_path))
}

/// Load the source named by `args` and run one analysis over it.
pub(crate) async fn run_analysis(
    args: &SourceArgs,
    config: &LogPulseConfig,
) -> Result<Analysis, CliError> {
    let analyzer = Analyzer::from_config(&config.analysis, &config.health)?;
    let filter = args.apply_filter(analyzer.filter());
    let analyzer = analyzer.with_filter(filter);

    let path = source_path(args.file.as_ref(), config);
    let source = LogSource::load(&path).await.map_err(|e| CliError::Source(e.to_string()))?;
    Ok(analyzer.run(&source)?)
}
