//! 위치 기반 CSV 레코드 파서
//!
//! 필드 순서가 `timestamp, ip, request, error_code`로 고정된 한 줄을 파싱합니다.
//!
//! # 사용 예시
//! ```
//! use logpulse_analyzer::parser::CsvRecordParser;
//! use logpulse_core::pipeline::RecordParser;
//!
//! let parser = CsvRecordParser::default();
//! let record = parser.parse("2024-01-15 12:00:00,10.0.0.1,GET,404").unwrap();
//! assert_eq!(record.error_code, 404);
//! ```

use logpulse_core::error::ParseError;
use logpulse_core::pipeline::RecordParser;
use logpulse_core::types::LogRecord;

/// 레코드 하나를 이루는 필드 개수
pub const FIELD_COUNT: usize = 4;

/// 위치 기반 CSV 파서
#[derive(Debug, Clone)]
pub struct CsvRecordParser {
    delimiter: char,
}

impl CsvRecordParser {
    /// 지정한 구분자로 파서를 생성합니다.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// 구분자를 반환합니다.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl Default for CsvRecordParser {
    fn default() -> Self {
        Self::new(',')
    }
}

impl RecordParser for CsvRecordParser {
    fn format_name(&self) -> &str {
        "csv"
    }

    fn parse(&self, raw: &str) -> Result<LogRecord, ParseError> {
        let fields: Vec<&str> = raw.trim().split(self.delimiter).collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        Ok(LogRecord {
            timestamp: fields[0].trim().to_owned(),
            ip: fields[1].trim().to_owned(),
            request: fields[2].trim().to_owned(),
            error_code: parse_error_code(fields[3])?,
        })
    }
}

/// error_code 필드를 정수로 변환합니다.
///
/// 앞뒤 공백은 허용하며, 그 밖의 형식은 모두 [`ParseError::InvalidErrorCode`]입니다.
pub(crate) fn parse_error_code(field: &str) -> Result<i64, ParseError> {
    let trimmed = field.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidErrorCode {
            value: trimmed.to_owned(),
        })
}
