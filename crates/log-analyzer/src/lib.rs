#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`source`]: 입력 파일 로딩 (열 수 없으면 실행 중단)
//! - [`parser`]: 라인 검증 및 레코드 변환 (위치 기반 / 헤더 기반)
//! - [`aggregate`]: 에러 코드 빈도, 에러 IP 순위, 요청 유형 분포, 최근 에러
//! - [`health`]: 에러율 계산 및 3단계 상태 분류
//! - [`analysis`]: 파싱부터 상태 분류까지 한 번의 실행
//! - [`report`]: 텍스트 리포트, 차트 시리즈(ASCII/SVG), 파일 출력
//! - [`session`]: 대시보드 로그인 세션
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! LogSource -> RecordParser -> ParsedBatch -> Aggregator -> AggregateStats -> HealthReport
//!                  |                |              |                              |
//!            csv / header      rejections     ErrorFilter                TextReport / ChartSeries
//! ```

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod health;
pub mod parser;
pub mod report;
pub mod session;
pub mod source;

// --- 주요 타입 re-export ---

// 실행
pub use analysis::{Analysis, Analyzer};

// 에러
pub use error::AnalyzerError;

// 파서
pub use parser::{
    ColumnMode, CsvRecordParser, HeaderRecordParser, ParsedBatch, ParserOptions, Rejection,
    ValidationOutcome, parse_source,
};

// 집계
pub use aggregate::{
    AggregateOptions, AggregateStats, Aggregator, ErrorFilter, FrequencyEntry, FrequencyTable,
};

// 상태 분류
pub use health::{HealthReport, HealthThresholds, error_rate};

// 리포트
pub use report::{ChartBar, ChartSeries, ReportWriter, TextReport};

// 세션
pub use session::{Session, StaticCredentials};

// 입력
pub use source::LogSource;
