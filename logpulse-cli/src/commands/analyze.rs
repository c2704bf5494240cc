//! `logpulse analyze` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logpulse_analyzer::{AggregateStats, Analysis, HealthReport, ReportWriter, TextReport};
use logpulse_core::config::LogPulseConfig;
use logpulse_core::types::HealthStatus;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `analyze` command.
///
/// Prints the summary and writes the text report to
/// `<report.output_dir>/<report.summary_file>` unless `--no-write` is given.
pub async fn execute(
    args: AnalyzeArgs,
    config: &LogPulseConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let analysis = super::run_analysis(&args.source, config).await?;

    let report_path = if args.source.no_write {
        None
    } else {
        let text = TextReport::new(&analysis.stats).to_text();
        let path = ReportWriter::new(&config.report.output_dir)
            .write(&config.report.summary_file, &text)
            .await?;
        Some(path.display().to_string())
    };

    let summary = AnalyzeSummary::new(analysis, report_path);
    info!(
        source = %summary.source,
        health = %summary.health.status,
        "analysis summary ready"
    );
    writer.render(&summary)?;

    Ok(())
}

/// Result of one `analyze` run.
#[derive(Serialize)]
pub struct AnalyzeSummary {
    /// Input file
    pub source: String,
    /// Error rate and status
    pub health: HealthReport,
    /// Aggregated statistics
    pub stats: AggregateStats,
    /// Written report file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

impl AnalyzeSummary {
    pub fn new(analysis: Analysis, report_path: Option<String>) -> Self {
        Self {
            source: analysis.source,
            health: analysis.health,
            stats: analysis.stats,
            report_path,
        }
    }
}

impl Render for AnalyzeSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Log Analysis: {}", self.source.bold())?;
        let health = self.health.to_string();
        let health = match self.health.status {
            HealthStatus::Healthy => health.green(),
            HealthStatus::Warning => health.yellow(),
            HealthStatus::Critical => health.red(),
        };
        writeln!(w, "  {}", health.bold())?;

        let filter = self.stats.filter;
        if !(filter.include_4xx && filter.include_5xx) {
            writeln!(
                w,
                "  Filter: 4xx {}, 5xx {} ({} of {} errors shown)",
                on_off(filter.include_4xx),
                on_off(filter.include_5xx),
                self.stats.filtered_errors,
                self.stats.total_errors
            )?;
        }
        writeln!(w)?;

        TextReport::new(&self.stats).render(w)?;

        if !self.stats.recent_errors.is_empty() {
            writeln!(w)?;
            writeln!(w, "Recent Error Events:")?;
            for record in &self.stats.recent_errors {
                writeln!(w, "  {}", record)?;
            }
        }

        if let Some(ref path) = self.report_path {
            writeln!(w)?;
            writeln!(w, "Report written to {}", path.dimmed())?;
        }
        Ok(())
    }
}

fn on_off(included: bool) -> &'static str {
    if included { "on" } else { "off" }
}
