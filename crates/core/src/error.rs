//! 에러 타입: 도메인별 에러 정의
//!
//! 레코드 단위 에러([`ParseError`])는 파서 경계에서 흡수되고,
//! 데이터셋 단위 에러([`SourceError`])는 호출자에게 그대로 전파됩니다.

/// logpulse 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogPulseError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 입력 소스 에러 (실행 중단)
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 인증 에러
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// 리포트 출력 에러
    #[error("report error: {0}")]
    Report(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 입력 소스 에러
///
/// 데이터셋 전체에 영향을 주는 에러로, 집계 전에 실행을 중단시킵니다.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// 파일이 없거나 읽을 수 없음
    #[error("source unavailable: {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// 헤더에 필수 컬럼이 없음 (헤더 모드)
    #[error("source header is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// 파싱 에러: 잘못된 로그 엔트리 하나를 설명합니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// 필드 개수 불일치
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// 헤더 폭과 행 폭 불일치 (헤더 모드)
    #[error("row has {found} columns, header has {expected}")]
    RowWidth { expected: usize, found: usize },

    /// error_code가 정수가 아님
    #[error("error_code is not an integer: {value:?}")]
    InvalidErrorCode { value: String },
}

/// 인증 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// 사용자명 또는 비밀번호 불일치
    #[error("invalid credentials")]
    InvalidCredentials,
}
