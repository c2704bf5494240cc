//! 헤더 기반 레코드 파서
//!
//! 헤더 행에서 `timestamp`, `ip`, `request`, `error_code` 컬럼의 위치를 찾아
//! 각 행을 파싱합니다. 컬럼 순서가 달라도 되고, 추가 컬럼은 무시됩니다.
//! 행의 폭은 헤더 폭과 같아야 합니다.

use logpulse_core::error::{ParseError, SourceError};
use logpulse_core::pipeline::RecordParser;
use logpulse_core::types::LogRecord;

use super::csv::parse_error_code;

/// 필수 컬럼 이름
pub const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "ip", "request", "error_code"];

/// 헤더 기반 파서
#[derive(Debug, Clone)]
pub struct HeaderRecordParser {
    delimiter: char,
    /// 헤더 컬럼 수
    width: usize,
    /// `REQUIRED_COLUMNS` 순서대로의 컬럼 위치
    positions: [usize; 4],
}

impl HeaderRecordParser {
    /// 헤더 행으로부터 파서를 생성합니다.
    ///
    /// 컬럼 이름은 앞뒤 공백을 제거하고 대소문자 구분 없이 비교합니다.
    /// 필수 컬럼이 하나라도 없으면 [`SourceError::MissingColumns`]를 반환합니다.
    pub fn from_header(header: &str, delimiter: char) -> Result<Self, SourceError> {
        let columns: Vec<String> = header
            .trim()
            .split(delimiter)
            .map(|c| c.trim().to_lowercase())
            .collect();

        let mut positions = [0usize; 4];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match columns.iter().position(|c| c == name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_owned()),
            }
        }

        if !missing.is_empty() {
            return Err(SourceError::MissingColumns { missing });
        }

        Ok(Self {
            delimiter,
            width: columns.len(),
            positions,
        })
    }

    /// 헤더 컬럼 수를 반환합니다.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl RecordParser for HeaderRecordParser {
    fn format_name(&self) -> &str {
        "header"
    }

    fn parse(&self, raw: &str) -> Result<LogRecord, ParseError> {
        let fields: Vec<&str> = raw.trim().split(self.delimiter).collect();
        if fields.len() != self.width {
            return Err(ParseError::RowWidth {
                expected: self.width,
                found: fields.len(),
            });
        }

        let [ts, ip, request, code] = self.positions;
        Ok(LogRecord {
            timestamp: fields[ts].trim().to_owned(),
            ip: fields[ip].trim().to_owned(),
            request: fields[request].trim().to_owned(),
            error_code: parse_error_code(fields[code])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_reordered_columns() {
        let parser =
            HeaderRecordParser::from_header("error_code,request,ip,timestamp", ',').unwrap();
        let record = parser.parse("500,POST,10.1.1.1,2024-01-15").unwrap();
        assert_eq!(record.timestamp, "2024-01-15");
        assert_eq!(record.ip, "10.1.1.1");
        assert_eq!(record.request, "POST");
        assert_eq!(record.error_code, 500);
    }

    #[test]
    fn ignores_extra_columns() {
        let parser =
            HeaderRecordParser::from_header("timestamp,ip,user_agent,request,error_code", ',')
                .unwrap();
        assert_eq!(parser.width(), 5);
        let record = parser.parse("t1,1.1.1.1,curl/8.0,GET,404").unwrap();
        assert_eq!(record.request, "GET");
        assert_eq!(record.error_code, 404);
    }

    #[test]
    fn header_names_are_case_insensitive() {
        assert!(HeaderRecordParser::from_header(" Timestamp , IP,Request,ERROR_CODE", ',').is_ok());
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = HeaderRecordParser::from_header("timestamp,host,request", ',').unwrap_err();
        match err {
            SourceError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["ip".to_owned(), "error_code".to_owned()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_row_with_wrong_width() {
        let parser = HeaderRecordParser::from_header("timestamp,ip,request,error_code", ',').unwrap();
        assert_eq!(
            parser.parse("t1,1.1.1.1,GET").unwrap_err(),
            ParseError::RowWidth {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_non_integer_code() {
        let parser = HeaderRecordParser::from_header("timestamp,ip,request,error_code", ',').unwrap();
        assert!(matches!(
            parser.parse("t1,1.1.1.1,GET,abc").unwrap_err(),
            ParseError::InvalidErrorCode { .. }
        ));
    }
}
