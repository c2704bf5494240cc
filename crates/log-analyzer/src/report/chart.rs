//! 막대 차트: 터미널 ASCII 막대와 정적 SVG 이미지
//!
//! [`ChartSeries`]는 렌더링 방식과 무관한 데이터입니다. 대시보드도 같은
//! 시리즈를 받아 ratatui 위젯으로 그립니다. 모든 막대에는 개수가 그대로
//! 주석으로 붙습니다.

use std::fmt::{Display, Write as _};
use std::io::{self, Write};

use serde::Serialize;

use crate::aggregate::{AggregateStats, FrequencyTable};

/// 에러 코드 분포 이미지 파일명
pub const ERROR_CODE_CHART_FILE: &str = "error_distribution_detailed.svg";
/// 에러 IP 순위 이미지 파일명
pub const TOP_IPS_CHART_FILE: &str = "top_5_ips_detailed.svg";
/// 요청 유형 이미지 파일명
pub const REQUEST_CHART_FILE: &str = "request_types.svg";

const ERROR_CODE_PALETTE: [&str; 3] = ["#d62728", "#ff7f0e", "#9467bd"];
const TOP_IP_COLOR: &str = "#1f77b4";
const REQUEST_COLOR: &str = "#2ca02c";

const SVG_WIDTH: u32 = 800;
const SVG_HEIGHT: u32 = 480;
const MARGIN_LEFT: u32 = 70;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 80;
const GRID_LINES: u32 = 5;

/// 막대 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: u64,
}

/// 막대 차트 시리즈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// 차트 제목
    pub title: String,
    /// X축 라벨
    pub x_label: String,
    /// Y축 라벨
    pub y_label: String,
    /// 막대 (표시 순서)
    pub bars: Vec<ChartBar>,
    /// 막대 색상 (순환 적용)
    pub colors: Vec<String>,
}

impl ChartSeries {
    fn from_table<K: Display>(
        title: &str,
        x_label: &str,
        y_label: &str,
        table: &FrequencyTable<K>,
        colors: &[&str],
    ) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            bars: table
                .iter()
                .map(|entry| ChartBar {
                    label: entry.key.to_string(),
                    value: entry.count as u64,
                })
                .collect(),
            colors: colors.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    /// 에러 코드 분포
    pub fn error_codes(stats: &AggregateStats) -> Self {
        Self::from_table(
            "HTTP Error Code Distribution",
            "Error Code",
            "Number of Errors",
            &stats.error_counts,
            &ERROR_CODE_PALETTE,
        )
    }

    /// 에러를 많이 낸 IP 순위
    pub fn top_ips(stats: &AggregateStats) -> Self {
        Self::from_table(
            "Top 5 IP Addresses Generating Errors",
            "IP Address",
            "Error Count",
            &stats.top_ips,
            &[TOP_IP_COLOR],
        )
    }

    /// 요청 유형 분포
    pub fn request_types(stats: &AggregateStats) -> Self {
        Self::from_table(
            "Request Type Distribution",
            "Request Type",
            "Count",
            &stats.request_counts,
            &[REQUEST_COLOR],
        )
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 가장 큰 막대 값
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|bar| bar.value).max().unwrap_or(0)
    }

    fn color_at(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            "#808080"
        } else {
            &self.colors[index % self.colors.len()]
        }
    }

    /// 터미널용 가로 막대를 그립니다.
    ///
    /// 막대 길이는 최대값을 `width` 문자에 맞춰 비례 계산합니다.
    /// 값이 0보다 크면 최소 한 칸은 그립니다.
    pub fn render_ascii(&self, writer: &mut dyn Write, width: usize) -> io::Result<()> {
        writeln!(writer, "{}", self.title)?;
        if self.bars.is_empty() {
            return writeln!(writer, "  (no data)");
        }

        let label_width = self
            .bars
            .iter()
            .map(|bar| bar.label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.max_value().max(1);

        for bar in &self.bars {
            let mut len = (bar.value as f64 / max as f64 * width as f64).round() as usize;
            if bar.value > 0 {
                len = len.max(1);
            }
            writeln!(
                writer,
                "  {:<label_width$} | {} {}",
                bar.label,
                "#".repeat(len),
                bar.value
            )?;
        }
        Ok(())
    }

    /// 정적 SVG 이미지로 렌더링합니다.
    pub fn to_svg(&self) -> String {
        let plot_w = SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let bottom = MARGIN_TOP + plot_h;
        let max = self.max_value().max(1);

        let mut svg = String::new();
        // String에 대한 write!는 실패하지 않음
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_WIDTH}" height="{SVG_HEIGHT}" viewBox="0 0 {SVG_WIDTH} {SVG_HEIGHT}" font-family="sans-serif">"#
        );
        let _ = writeln!(
            svg,
            r#"<rect width="{SVG_WIDTH}" height="{SVG_HEIGHT}" fill="white"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="32" font-size="20" font-weight="bold" text-anchor="middle">{}</text>"#,
            SVG_WIDTH / 2,
            escape_xml(&self.title)
        );

        // Y축 점선 그리드
        for i in 0..=GRID_LINES {
            let y = bottom - plot_h * i / GRID_LINES;
            let tick = max as f64 * f64::from(i) / f64::from(GRID_LINES);
            let _ = writeln!(
                svg,
                r##"<line x1="{MARGIN_LEFT}" y1="{y}" x2="{}" y2="{y}" stroke="#cccccc" stroke-dasharray="4 4"/>"##,
                MARGIN_LEFT + plot_w
            );
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="11" text-anchor="end">{tick:.0}</text>"#,
                MARGIN_LEFT - 8,
                y + 4
            );
        }

        if !self.bars.is_empty() {
            let slot = plot_w / self.bars.len() as u32;
            let bar_w = (slot * 6 / 10).max(1);
            for (i, bar) in self.bars.iter().enumerate() {
                let h = (bar.value as f64 / max as f64 * f64::from(plot_h)).round() as u32;
                let x = MARGIN_LEFT + slot * i as u32 + slot.saturating_sub(bar_w) / 2;
                let y = bottom - h;
                let center = x + bar_w / 2;
                let _ = writeln!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{bar_w}" height="{h}" fill="{}" stroke="black"/>"#,
                    self.color_at(i)
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{center}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
                    y.saturating_sub(6),
                    bar.value
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{center}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
                    bottom + 18,
                    escape_xml(&bar.label)
                );
            }
        }

        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{}" y2="{bottom}" stroke="black"/>"#,
            MARGIN_LEFT + plot_w
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2,
            SVG_HEIGHT - 24,
            escape_xml(&self.x_label)
        );
        let _ = writeln!(
            svg,
            r#"<text x="20" y="{}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {})">{}</text>"#,
            MARGIN_TOP + plot_h / 2,
            MARGIN_TOP + plot_h / 2,
            escape_xml(&self.y_label)
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
