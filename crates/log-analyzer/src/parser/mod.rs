//! 레코드 파싱 모듈: 원시 라인을 검증하여 [`LogRecord`]로 변환
//!
//! 입력 한 단위(한 줄)는 정확히 하나의 [`ValidationOutcome`]을 만듭니다.
//! 잘못된 엔트리는 [`Rejection`]으로 기록되고 `warn` 로그를 남길 뿐,
//! 실행을 중단시키지 않습니다.
//!
//! # 지원 형식
//! - 위치 기반 CSV ([`CsvRecordParser`])
//! - 헤더 기반 CSV ([`HeaderRecordParser`])
//!
//! # 사용 예시
//! ```
//! use logpulse_analyzer::parser::{parse_source, ParserOptions};
//!
//! let text = "timestamp,ip,request,error_code\nt1,1.1.1.1,GET,404\nt2,2.2.2.2,GET,abc\n";
//! let batch = parse_source(text, &ParserOptions::default()).unwrap();
//! assert_eq!(batch.records.len(), 1);
//! assert_eq!(batch.invalid_lines(), 1);
//! ```

pub mod csv;
pub mod header;

pub use csv::CsvRecordParser;
pub use header::HeaderRecordParser;

use std::fmt;
use std::str::FromStr;

use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use logpulse_core::error::{ParseError, SourceError};
use logpulse_core::metrics::{
    ANALYZER_LINES_READ_TOTAL, ANALYZER_LINES_REJECTED_TOTAL, ANALYZER_RECORDS_VALID_TOTAL,
    LABEL_PARSER_FORMAT,
};
use logpulse_core::pipeline::RecordParser;
use logpulse_core::types::LogRecord;

/// 컬럼 해석 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ColumnMode {
    /// 고정 순서 4개 필드
    #[default]
    Positional,
    /// 헤더 이름으로 컬럼 위치 결정
    Header,
}

impl FromStr for ColumnMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "header" => Ok(Self::Header),
            other => Err(format!(
                "unknown column mode: {other} (expected: positional, header)"
            )),
        }
    }
}

impl fmt::Display for ColumnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// 파싱 옵션
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// 필드 구분자
    pub delimiter: char,
    /// 첫 줄이 헤더인지 여부
    pub has_header: bool,
    /// 컬럼 해석 방식
    pub column_mode: ColumnMode,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            column_mode: ColumnMode::Positional,
        }
    }
}

/// 검증에 실패한 입력 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// 1부터 시작하는 물리적 라인 번호 (헤더 포함)
    pub line_number: usize,
    /// 원본 텍스트
    pub raw: String,
    /// 실패 사유
    #[serde(serialize_with = "serialize_display")]
    pub reason: ParseError,
}

fn serialize_display<S: serde::Serializer>(
    reason: &ParseError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// 입력 한 단위의 검증 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// 유효한 레코드
    Valid(LogRecord),
    /// 거부된 엔트리
    Rejected(Rejection),
}

/// 파싱된 입력 전체
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedBatch {
    /// 유효한 레코드 (입력 순서 유지)
    pub records: Vec<LogRecord>,
    /// 거부된 엔트리 (입력 순서 유지)
    pub rejections: Vec<Rejection>,
}

impl ParsedBatch {
    /// 잘못된 라인 수
    pub fn invalid_lines(&self) -> usize {
        self.rejections.len()
    }

    /// 헤더를 제외한 전체 입력 라인 수
    pub fn total_lines(&self) -> usize {
        self.records.len() + self.rejections.len()
    }

    /// 검증 결과 하나를 추가합니다.
    pub fn push(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Valid(record) => self.records.push(record),
            ValidationOutcome::Rejected(rejection) => self.rejections.push(rejection),
        }
    }
}

/// 입력 한 줄을 검증합니다.
pub fn validate(parser: &dyn RecordParser, line_number: usize, raw: &str) -> ValidationOutcome {
    match parser.parse(raw) {
        Ok(record) => ValidationOutcome::Valid(record),
        Err(reason) => ValidationOutcome::Rejected(Rejection {
            line_number,
            raw: raw.trim().to_owned(),
            reason,
        }),
    }
}

/// 라인 목록을 파싱합니다.
///
/// `first_line_number`는 첫 라인의 물리적 라인 번호입니다.
/// 거부된 엔트리마다 `warn` 로그를 남깁니다.
pub fn parse_lines<'a, I>(
    parser: &dyn RecordParser,
    lines: I,
    first_line_number: usize,
) -> ParsedBatch
where
    I: IntoIterator<Item = &'a str>,
{
    let mut batch = ParsedBatch::default();

    for (offset, raw) in lines.into_iter().enumerate() {
        let outcome = validate(parser, first_line_number + offset, raw);
        if let ValidationOutcome::Rejected(rejection) = &outcome {
            warn!(
                line = rejection.line_number,
                raw = %rejection.raw,
                reason = %rejection.reason,
                "invalid log entry skipped"
            );
        }
        batch.push(outcome);
    }

    let format = parser.format_name().to_owned();
    counter!(ANALYZER_LINES_READ_TOTAL).increment(batch.total_lines() as u64);
    counter!(ANALYZER_RECORDS_VALID_TOTAL).increment(batch.records.len() as u64);
    counter!(ANALYZER_LINES_REJECTED_TOTAL, LABEL_PARSER_FORMAT => format)
        .increment(batch.invalid_lines() as u64);

    batch
}

/// 소스 텍스트 전체를 파싱합니다.
///
/// `has_header`가 참이면 첫 줄을 헤더로 취급하여 건너뜁니다
/// (헤더 모드에서는 컬럼 위치를 결정하는 데 사용합니다).
/// 빈 입력은 빈 배치를 반환합니다. 헤더 모드인데 `has_header`가 거짓이면
/// 모든 필수 컬럼이 없는 것으로 보고 [`SourceError::MissingColumns`]를 반환합니다.
pub fn parse_source(text: &str, options: &ParserOptions) -> Result<ParsedBatch, SourceError> {
    // 헤더 모드는 헤더 행 없이 컬럼 위치를 알 수 없음
    if options.column_mode == ColumnMode::Header && !options.has_header {
        return Err(SourceError::MissingColumns {
            missing: header::REQUIRED_COLUMNS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        });
    }

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    let header = if options.has_header {
        lines.next()
    } else {
        None
    };
    let first_line_number = if options.has_header { 2 } else { 1 };

    let parser: Box<dyn RecordParser> = match options.column_mode {
        ColumnMode::Positional => Box::new(CsvRecordParser::new(options.delimiter)),
        ColumnMode::Header => match header {
            Some(header) => Box::new(HeaderRecordParser::from_header(header, options.delimiter)?),
            // 헤더 행조차 없는 빈 입력
            None => return Ok(ParsedBatch::default()),
        },
    };

    debug!(
        format = parser.format_name(),
        has_header = options.has_header,
        "parsing source"
    );

    Ok(parse_lines(parser.as_ref(), lines, first_line_number))
}
