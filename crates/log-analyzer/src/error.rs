//! 분석기 에러 타입
//!
//! [`AnalyzerError`]는 분석기 내부에서 발생하는 데이터셋 단위 에러를 표현합니다.
//! 레코드 단위 에러는 파서 경계에서 흡수되므로 여기에 나타나지 않습니다.
//! `From<AnalyzerError> for LogPulseError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logpulse_core::error::{ConfigError, LogPulseError, SourceError};

/// 분석기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// 입력 소스 에러 (실행 중단)
    #[error(transparent)]
    Source(#[from] SourceError),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 리포트 파일 출력 실패
    #[error("report write error: {path}: {reason}")]
    Report {
        /// 출력 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },
}

impl From<AnalyzerError> for LogPulseError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::Source(e) => LogPulseError::Source(e),
            AnalyzerError::Config { field, reason } => {
                LogPulseError::Config(ConfigError::InvalidValue { field, reason })
            }
            AnalyzerError::Report { .. } => LogPulseError::Report(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_is_transparent() {
        let err = AnalyzerError::from(SourceError::Unavailable {
            path: "missing.csv".to_owned(),
            reason: "No such file or directory".to_owned(),
        });
        assert_eq!(
            err.to_string(),
            "source unavailable: missing.csv: No such file or directory"
        );
    }

    #[test]
    fn converts_source_to_top_level_source() {
        let err = AnalyzerError::from(SourceError::MissingColumns {
            missing: vec!["ip".to_owned()],
        });
        let top: LogPulseError = err.into();
        assert!(matches!(top, LogPulseError::Source(_)));
    }

    #[test]
    fn converts_config_to_invalid_value() {
        let err = AnalyzerError::Config {
            field: "analysis.delimiter".to_owned(),
            reason: "empty".to_owned(),
        };
        let top: LogPulseError = err.into();
        assert!(matches!(
            top,
            LogPulseError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn report_error_display() {
        let err = AnalyzerError::Report {
            path: "output/summary_report.txt".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("summary_report.txt"));
        assert!(msg.contains("permission denied"));
    }
}
