//! 입력 소스: 분석 대상 텍스트 로딩
//!
//! 소스를 열 수 없거나 UTF-8이 아니면 [`SourceError::Unavailable`]로
//! 실행 전체를 중단합니다. 레코드 단위 검증은 [`crate::parser`]가 담당합니다.

use std::path::Path;

use tracing::{debug, error};

use logpulse_core::error::SourceError;

/// 메모리에 읽어 들인 입력 소스
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    name: String,
    text: String,
}

impl LogSource {
    /// 파일에서 소스를 로드합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            error!(path = %name, error = %e, "failed to open log source");
            SourceError::Unavailable {
                path: name.clone(),
                reason: e.to_string(),
            }
        })?;

        let text = String::from_utf8(bytes).map_err(|e| SourceError::Unavailable {
            path: name.clone(),
            reason: format!("not valid UTF-8: {e}"),
        })?;

        debug!(path = %name, bytes = text.len(), "log source loaded");
        Ok(Self { name, text })
    }

    /// 이미 메모리에 있는 텍스트로 소스를 만듭니다.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// 소스 이름 (파일 경로 또는 임의 라벨)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 원본 텍스트
    pub fn text(&self) -> &str {
        &self.text
    }
}
