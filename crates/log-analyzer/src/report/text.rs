//! 텍스트 리포트
//!
//! 고정 레이아웃의 요약 리포트를 씁니다. 헤더 문자열은 다른 도구가
//! 파싱할 수 있도록 그대로 유지해야 합니다.

use std::fmt::Display;
use std::io::{self, Write};

use crate::aggregate::{AggregateStats, FrequencyTable};

/// 리포트 제목
pub const REPORT_TITLE: &str = "LOG FILE ANALYSIS REPORT";
/// 에러 코드 섹션 헤더
pub const ERROR_CODE_HEADER: &str = "Error Code Frequency:";
/// 에러 IP 섹션 헤더
pub const TOP_IPS_HEADER: &str = "Top 5 IPs with Errors:";

/// 텍스트 리포트 렌더러
#[derive(Debug)]
pub struct TextReport<'a> {
    stats: &'a AggregateStats,
}

impl<'a> TextReport<'a> {
    pub fn new(stats: &'a AggregateStats) -> Self {
        Self { stats }
    }

    /// 리포트를 `writer`에 씁니다.
    pub fn render(&self, writer: &mut dyn Write) -> io::Result<()> {
        let stats = self.stats;
        writeln!(writer, "{REPORT_TITLE}")?;
        writeln!(writer, "{}", "=".repeat(REPORT_TITLE.len()))?;
        writeln!(writer, "Total Requests : {}", stats.total_requests)?;
        writeln!(writer, "Total Errors   : {}", stats.total_errors)?;
        writeln!(writer, "Invalid Lines  : {}", stats.invalid_lines)?;
        writeln!(writer)?;

        writeln!(writer, "{ERROR_CODE_HEADER}")?;
        write_table(writer, &stats.error_counts)?;
        writeln!(writer)?;

        writeln!(writer, "{TOP_IPS_HEADER}")?;
        write_table(writer, &stats.top_ips)?;
        Ok(())
    }

    /// 리포트를 문자열로 렌더링합니다.
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Vec<u8>에 대한 쓰기는 실패하지 않음
        let _ = self.render(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn write_table<K: Display>(writer: &mut dyn Write, table: &FrequencyTable<K>) -> io::Result<()> {
    if table.is_empty() {
        return writeln!(writer, "(none)");
    }
    for entry in table {
        writeln!(writer, "{}    {}", entry.key, entry.count)?;
    }
    Ok(())
}
