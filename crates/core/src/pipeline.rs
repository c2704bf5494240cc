//! 파이프라인 trait: 모듈 확장 포인트 정의

use crate::error::ParseError;
use crate::types::LogRecord;

/// 레코드 파서 trait
///
/// 새로운 입력 형식을 지원하려면 이 trait을 구현합니다.
/// 한 번의 호출은 입력 한 줄(또는 한 행)에 대응합니다.
pub trait RecordParser: Send + Sync {
    /// 지원하는 입력 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 텍스트 한 줄을 로그 레코드로 파싱
    fn parse(&self, raw: &str) -> Result<LogRecord, ParseError>;
}

/// 자격 증명 검증 trait
///
/// 대시보드 로그인 게이트가 사용합니다. 검증 방식은 구현체가 결정합니다.
pub trait CredentialVerifier: Send + Sync {
    /// 사용자명/비밀번호 쌍이 유효한지 확인
    fn verify(&self, username: &str, password: &str) -> bool;
}
