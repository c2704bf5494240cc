//! 리포트 렌더링: 텍스트 리포트, 차트 시리즈, 파일 출력
//!
//! 렌더러는 분석 결과만 읽으며 집계에 관여하지 않습니다.

pub mod chart;
pub mod text;

pub use chart::{ChartBar, ChartSeries};
pub use text::TextReport;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AnalyzerError;

/// 출력 디렉토리에 리포트 파일을 씁니다.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `file_name`으로 내용을 씁니다. 디렉토리가 없으면 만듭니다.
    ///
    /// 같은 이름의 파일이 있으면 덮어씁니다.
    pub async fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, AnalyzerError> {
        let path = self.output_dir.join(file_name);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AnalyzerError::Report {
                path: self.output_dir.display().to_string(),
                reason: e.to_string(),
            })?;

        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| AnalyzerError::Report {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!(path = %path.display(), bytes = contents.len(), "report written");
        Ok(path)
    }
}
