//! 상태 분류기: 에러율을 3단계 상태로 변환
//!
//! 경계값은 높은 등급에 속합니다 (`10.0`은 Warning, `30.0`은 Critical).

use std::fmt;

use serde::Serialize;

use logpulse_core::config::HealthConfig;
use logpulse_core::types::HealthStatus;

use crate::aggregate::AggregateStats;

/// 에러율(퍼센트)을 계산합니다. 요청이 없으면 0입니다.
pub fn error_rate(total_errors: usize, total_requests: usize) -> f64 {
    if total_requests == 0 {
        return 0.0;
    }
    total_errors as f64 / total_requests as f64 * 100.0
}

/// 상태 분류 기준
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthThresholds {
    /// 이 값 이상이면 Warning
    pub warning_rate: f64,
    /// 이 값 이상이면 Critical
    pub critical_rate: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            warning_rate: 10.0,
            critical_rate: 30.0,
        }
    }
}

impl From<&HealthConfig> for HealthThresholds {
    fn from(config: &HealthConfig) -> Self {
        Self {
            warning_rate: config.warning_rate,
            critical_rate: config.critical_rate,
        }
    }
}

impl HealthThresholds {
    /// 에러율을 분류합니다.
    pub fn classify(&self, rate: f64) -> HealthStatus {
        if rate >= self.critical_rate {
            HealthStatus::Critical
        } else if rate >= self.warning_rate {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

/// 에러율과 상태
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthReport {
    /// 에러율 (퍼센트)
    pub rate: f64,
    pub status: HealthStatus,
}

impl HealthReport {
    /// 집계 결과에서 상태를 계산합니다.
    ///
    /// 에러율은 필터와 무관하게 전체 에러 수로 계산합니다.
    pub fn from_stats(stats: &AggregateStats, thresholds: &HealthThresholds) -> Self {
        let rate = error_rate(stats.total_errors, stats.total_requests);
        Self {
            rate,
            status: thresholds.classify(rate),
        }
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "System {} (Error Rate: {:.1}%)", self.status, self.rate)
    }
}
