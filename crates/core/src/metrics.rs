//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 분석기는 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않으면 호출은 아무 효과가 없습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logpulse_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logpulse_core::metrics::ANALYZER_LINES_REJECTED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 파서 형식 레이블 키 (csv, header)
pub const LABEL_PARSER_FORMAT: &str = "format";

/// 상태 등급 레이블 키 (healthy, warning, critical)
pub const LABEL_HEALTH: &str = "health";

// ─── Analyzer 메트릭 ────────────────────────────────────────────────

/// Analyzer: 읽어 들인 입력 라인 수, 헤더 제외 (counter)
pub const ANALYZER_LINES_READ_TOTAL: &str = "logpulse_analyzer_lines_read_total";

/// Analyzer: 검증을 통과한 레코드 수 (counter)
pub const ANALYZER_RECORDS_VALID_TOTAL: &str = "logpulse_analyzer_records_valid_total";

/// Analyzer: 검증에 실패한 라인 수 (counter, label: format)
pub const ANALYZER_LINES_REJECTED_TOTAL: &str = "logpulse_analyzer_lines_rejected_total";

/// Analyzer: 완료된 분석 실행 수 (counter, label: health)
pub const ANALYZER_RUNS_COMPLETED_TOTAL: &str = "logpulse_analyzer_runs_completed_total";

/// Analyzer: 파싱 + 집계 소요 시간 (histogram, 초)
pub const ANALYZER_RUN_DURATION_SECONDS: &str = "logpulse_analyzer_run_duration_seconds";

/// 분석 실행 소요 시간 히스토그램 버킷 (초)
pub const RUN_DURATION_BUCKETS: [f64; 8] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 10.0];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        ANALYZER_LINES_READ_TOTAL,
        "Total number of input lines read, excluding the header"
    );
    describe_counter!(
        ANALYZER_RECORDS_VALID_TOTAL,
        "Total number of lines that passed validation"
    );
    describe_counter!(
        ANALYZER_LINES_REJECTED_TOTAL,
        "Total number of malformed lines skipped"
    );
    describe_counter!(
        ANALYZER_RUNS_COMPLETED_TOTAL,
        "Total number of completed analysis runs by health status"
    );
    describe_histogram!(
        ANALYZER_RUN_DURATION_SECONDS,
        "Time to parse and aggregate one source in seconds"
    );
}
