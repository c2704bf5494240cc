//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use logpulse_analyzer::ErrorFilter;

/// logpulse: log file analyzer with reports, charts and a terminal dashboard.
///
/// Use `logpulse <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logpulse", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logpulse.toml configuration file (defaults apply when missing).
    #[arg(short, long, global = true, default_value = "logpulse.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a log file and write the summary report.
    Analyze(AnalyzeArgs),

    /// Render error-code, top-IP and request-type charts.
    Chart(ChartArgs),

    /// Open the interactive terminal dashboard.
    Dashboard(DashboardArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- shared ----

/// Input and filter options shared by `analyze` and `chart`.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Log file to analyze (default: analysis.source_path).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Exclude 4xx client errors from the error tables.
    #[arg(long)]
    pub no_4xx: bool,

    /// Exclude 5xx server errors from the error tables.
    #[arg(long)]
    pub no_5xx: bool,

    /// Do not write output files.
    #[arg(long)]
    pub no_write: bool,
}

impl SourceArgs {
    /// Narrow the configured filter with the command-line switches.
    pub fn apply_filter(&self, mut filter: ErrorFilter) -> ErrorFilter {
        if self.no_4xx {
            filter.include_4xx = false;
        }
        if self.no_5xx {
            filter.include_5xx = false;
        }
        filter
    }
}

// ---- analyze ----

/// Analyze a log file.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

// ---- chart ----

/// Render charts as terminal bars and SVG images.
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Which chart to render.
    #[arg(long, default_value = "all")]
    pub kind: ChartKind,
}

/// Chart selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    All,
    ErrorCodes,
    TopIps,
    Requests,
}

// ---- dashboard ----

/// Interactive dashboard behind a login screen.
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Log file to open first (default: analysis.source_path).
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

// ---- config ----

/// Manage logpulse configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, analysis, health, report, dashboard).
        #[arg(long)]
        section: Option<String>,
    },
}
