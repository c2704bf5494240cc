//! 분석 실행: 파싱, 집계, 상태 분류를 한 번에 수행
//!
//! [`Analyzer`]는 설정에서 만들어지며 입력 소스 하나를 [`Analysis`]로 변환합니다.
//! 대시보드처럼 필터만 바꿔 다시 집계해야 하는 경우 [`Analyzer::parse`]와
//! [`Analyzer::summarize`]를 나눠 호출합니다.

use std::time::Instant;

use metrics::{counter, histogram};
use serde::Serialize;
use tracing::info;

use logpulse_core::config::{AnalysisConfig, HealthConfig};
use logpulse_core::metrics::{
    ANALYZER_RUN_DURATION_SECONDS, ANALYZER_RUNS_COMPLETED_TOTAL, LABEL_HEALTH,
};

use crate::aggregate::{AggregateOptions, AggregateStats, Aggregator, ErrorFilter};
use crate::error::AnalyzerError;
use crate::health::{HealthReport, HealthThresholds};
use crate::parser::{ColumnMode, ParsedBatch, ParserOptions, parse_source};
use crate::source::LogSource;

/// 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// 입력 소스 이름
    pub source: String,
    /// 집계 통계
    pub stats: AggregateStats,
    /// 에러율과 상태
    pub health: HealthReport,
}

/// 분석기
#[derive(Debug, Clone)]
pub struct Analyzer {
    parser_options: ParserOptions,
    aggregator: Aggregator,
    thresholds: HealthThresholds,
    filter: ErrorFilter,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            parser_options: ParserOptions::default(),
            aggregator: Aggregator::default(),
            thresholds: HealthThresholds::default(),
            filter: ErrorFilter::default(),
        }
    }
}

impl Analyzer {
    /// 설정으로부터 분석기를 생성합니다.
    pub fn from_config(
        analysis: &AnalysisConfig,
        health: &HealthConfig,
    ) -> Result<Self, AnalyzerError> {
        let mut chars = analysis.delimiter.chars();
        let delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(AnalyzerError::Config {
                    field: "analysis.delimiter".to_owned(),
                    reason: format!(
                        "delimiter must be exactly one character, got {:?}",
                        analysis.delimiter
                    ),
                });
            }
        };

        let column_mode: ColumnMode =
            analysis
                .column_mode
                .parse()
                .map_err(|reason| AnalyzerError::Config {
                    field: "analysis.column_mode".to_owned(),
                    reason,
                })?;

        Ok(Self {
            parser_options: ParserOptions {
                delimiter,
                has_header: analysis.has_header,
                column_mode,
            },
            aggregator: Aggregator::new(AggregateOptions {
                top_ip_limit: analysis.top_ip_limit,
                recent_limit: analysis.recent_errors_limit,
            }),
            thresholds: HealthThresholds::from(health),
            filter: ErrorFilter {
                include_4xx: analysis.include_4xx,
                include_5xx: analysis.include_5xx,
            },
        })
    }

    /// 기본 에러 필터를 교체합니다.
    pub fn with_filter(mut self, filter: ErrorFilter) -> Self {
        self.filter = filter;
        self
    }

    /// 설정된 기본 에러 필터
    pub fn filter(&self) -> ErrorFilter {
        self.filter
    }

    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_options
    }

    pub fn thresholds(&self) -> HealthThresholds {
        self.thresholds
    }

    /// 소스를 파싱합니다.
    pub fn parse(&self, source: &LogSource) -> Result<ParsedBatch, AnalyzerError> {
        Ok(parse_source(source.text(), &self.parser_options)?)
    }

    /// 이미 파싱된 배치를 주어진 필터로 집계하고 상태를 분류합니다.
    pub fn summarize(
        &self,
        source_name: &str,
        batch: &ParsedBatch,
        filter: &ErrorFilter,
    ) -> Analysis {
        let stats = self.aggregator.aggregate(batch, filter);
        let health = HealthReport::from_stats(&stats, &self.thresholds);
        Analysis {
            source: source_name.to_owned(),
            stats,
            health,
        }
    }

    /// 소스 하나를 처음부터 끝까지 분석합니다.
    pub fn run(&self, source: &LogSource) -> Result<Analysis, AnalyzerError> {
        let started = Instant::now();
        info!(source = source.name(), "log analysis started");

        let batch = self.parse(source)?;
        let analysis = self.summarize(source.name(), &batch, &self.filter);

        let elapsed = started.elapsed();
        counter!(
            ANALYZER_RUNS_COMPLETED_TOTAL,
            LABEL_HEALTH => analysis.health.status.to_string()
        )
        .increment(1);
        histogram!(ANALYZER_RUN_DURATION_SECONDS).record(elapsed.as_secs_f64());

        info!(
            source = source.name(),
            total_requests = analysis.stats.total_requests,
            total_errors = analysis.stats.total_errors,
            invalid_lines = analysis.stats.invalid_lines,
            health = %analysis.health.status,
            elapsed_ms = elapsed.as_millis() as u64,
            "log analysis completed"
        );
        Ok(analysis)
    }
}
