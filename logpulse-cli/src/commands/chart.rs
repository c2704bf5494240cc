//! `logpulse chart` command handler

use std::io::Write;

use serde::Serialize;

use logpulse_analyzer::report::chart::{
    ERROR_CODE_CHART_FILE, REQUEST_CHART_FILE, TOP_IPS_CHART_FILE,
};
use logpulse_analyzer::{AggregateStats, ChartSeries, ReportWriter};
use logpulse_core::config::LogPulseConfig;

use crate::cli::{ChartArgs, ChartKind};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `chart` command.
///
/// Prints ASCII bars and writes one SVG image per chart into
/// `report.output_dir` unless `--no-write` is given.
pub async fn execute(
    args: ChartArgs,
    config: &LogPulseConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let analysis = super::run_analysis(&args.source, config).await?;

    let mut charts = select_charts(&analysis.stats, args.kind);

    if !args.source.no_write {
        let report_writer = ReportWriter::new(&config.report.output_dir);
        for chart in &mut charts {
            let path = report_writer
                .write(chart.file_name, &chart.series.to_svg())
                .await?;
            chart.written_to = Some(path.display().to_string());
        }
    }

    writer.render(&ChartReport {
        source: analysis.source,
        width: config.report.chart_width,
        charts,
    })?;
    Ok(())
}

fn select_charts(stats: &AggregateStats, kind: ChartKind) -> Vec<RenderedChart> {
    let mut charts = Vec::new();
    if matches!(kind, ChartKind::All | ChartKind::ErrorCodes) {
        charts.push(RenderedChart::new(
            ChartSeries::error_codes(stats),
            ERROR_CODE_CHART_FILE,
        ));
    }
    if matches!(kind, ChartKind::All | ChartKind::TopIps) {
        charts.push(RenderedChart::new(
            ChartSeries::top_ips(stats),
            TOP_IPS_CHART_FILE,
        ));
    }
    if matches!(kind, ChartKind::All | ChartKind::Requests) {
        charts.push(RenderedChart::new(
            ChartSeries::request_types(stats),
            REQUEST_CHART_FILE,
        ));
    }
    charts
}

/// One chart series plus where its image went.
#[derive(Serialize)]
pub struct RenderedChart {
    #[serde(flatten)]
    pub series: ChartSeries,
    #[serde(skip)]
    pub file_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
}

impl RenderedChart {
    fn new(series: ChartSeries, file_name: &'static str) -> Self {
        Self {
            series,
            file_name,
            written_to: None,
        }
    }
}

/// Charts rendered from one source.
#[derive(Serialize)]
pub struct ChartReport {
    pub source: String,
    #[serde(skip)]
    pub width: usize,
    pub charts: Vec<RenderedChart>,
}

impl Render for ChartReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Charts: {}", self.source.bold())?;
        for chart in &self.charts {
            writeln!(w)?;
            chart.series.render_ascii(w, self.width)?;
            if let Some(ref path) = chart.written_to {
                writeln!(w, "  -> {}", path.dimmed())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpulse_analyzer::{Analyzer, LogSource};

    fn stats() -> AggregateStats {
        let text = "timestamp,ip,request,error_code\n\
                    t1,1.1.1.1,GET,404\n\
                    t2,2.2.2.2,POST,500\n\
                    t3,1.1.1.1,GET,404\n";
        Analyzer::default()
            .run(&LogSource::from_text("inline", text))
            .expect("analysis")
            .stats
    }

    #[test]
    fn test_select_all_charts() {
        let charts = select_charts(&stats(), ChartKind::All);
        let files: Vec<&str> = charts.iter().map(|c| c.file_name).collect();
        assert_eq!(
            files,
            vec![ERROR_CODE_CHART_FILE, TOP_IPS_CHART_FILE, REQUEST_CHART_FILE]
        );
    }

    #[test]
    fn test_select_single_chart() {
        let charts = select_charts(&stats(), ChartKind::Requests);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].series.title, "Request Type Distribution");
    }

    #[test]
    fn test_render_text_includes_bars() {
        colored::control::set_override(false);
        let report = ChartReport {
            source: "inline".to_owned(),
            width: 10,
            charts: select_charts(&stats(), ChartKind::ErrorCodes),
        };
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("HTTP Error Code Distribution"));
        assert!(output.contains("404 | ########## 2"));
        assert!(output.contains("500 | ##### 1"));
    }

    #[test]
    fn test_json_flattens_series() {
        let report = ChartReport {
            source: "inline".to_owned(),
            width: 40,
            charts: select_charts(&stats(), ChartKind::TopIps),
        };
        let parsed = serde_json::to_value(&report).expect("JSON serialization should succeed");
        let chart = &parsed["charts"][0];
        assert_eq!(
            chart["title"].as_str(),
            Some("Top 5 IP Addresses Generating Errors")
        );
        assert_eq!(chart["bars"][0]["label"].as_str(), Some("1.1.1.1"));
        assert_eq!(chart["bars"][0]["value"].as_u64(), Some(2));
        assert!(chart.get("written_to").is_none());
    }
}
