//! 도메인 타입: 시스템 전역에서 사용되는 공통 타입
//!
//! 파서, 집계기, 리포트 렌더러가 공유하는 데이터 구조를 정의합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 에러로 간주하는 최소 상태 코드
pub const ERROR_CODE_THRESHOLD: i64 = 400;

/// 로그 레코드
///
/// 입력 한 줄(또는 한 행)에서 검증을 통과해 생성된 레코드입니다.
/// 생성 이후 변경되지 않으며, 실행이 끝나면 버려집니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRecord {
    /// 타임스탬프 (원본 문자열 그대로)
    pub timestamp: String,
    /// 요청 IP
    pub ip: String,
    /// 요청 유형 (GET, POST 등)
    pub request: String,
    /// HTTP 스타일 상태 코드
    pub error_code: i64,
}

impl LogRecord {
    /// 상태 코드가 에러(`>= 400`)인지 확인합니다.
    pub fn is_error(&self) -> bool {
        self.error_code >= ERROR_CODE_THRESHOLD
    }

    /// 상태 코드의 에러 분류를 반환합니다.
    pub fn error_class(&self) -> ErrorClass {
        ErrorClass::of(self.error_code)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.timestamp, self.ip, self.request, self.error_code
        )
    }
}

/// 상태 코드 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// 400 미만, 에러 아님
    NotError,
    /// 4xx (400..=499)
    ClientError,
    /// 5xx (500..=599)
    ServerError,
    /// 600 이상. 에러지만 4xx/5xx 어디에도 속하지 않음
    Other,
}

impl ErrorClass {
    /// 상태 코드를 분류합니다.
    pub fn of(code: i64) -> Self {
        match code {
            i64::MIN..=399 => Self::NotError,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

/// 시스템 상태 등급
///
/// 에러율에서 결정되는 3단계 상태입니다.
/// `Ord` 구현으로 비교가 가능합니다 (`Healthy < Warning < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HealthStatus {
    /// 에러율이 경고 기준 미만
    #[default]
    Healthy,
    /// 경고 기준 이상, 위험 기준 미만
    Warning,
    /// 위험 기준 이상
    Critical,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}
