//! 설정 관리: logpulse.toml 파싱 및 런타임 설정
//!
//! [`LogPulseConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGPULSE_ANALYSIS_SOURCE_PATH=logs/today.csv` 형식)
//! 3. 설정 파일 (`logpulse.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logpulse_core::error::LogPulseError> {
//! use logpulse_core::config::LogPulseConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogPulseConfig::load("logpulse.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogPulseConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, LogPulseError};

/// logpulse 통합 설정
///
/// `logpulse.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogPulseConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 상태 분류 기준
    #[serde(default)]
    pub health: HealthConfig,
    /// 리포트 출력 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 대시보드 설정
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl LogPulseConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogPulseError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 대체하여 로드합니다.
    ///
    /// 파일이 존재하지만 파싱에 실패하는 경우는 에러를 그대로 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LogPulseError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(LogPulseError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogPulseError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogPulseError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogPulseError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogPulseError> {
        toml::from_str(toml_str).map_err(|e| {
            LogPulseError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGPULSE_{SECTION}_{FIELD}`
    /// 예: `LOGPULSE_HEALTH_WARNING_RATE=5`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGPULSE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGPULSE_GENERAL_LOG_FORMAT");
        override_string(&mut self.general.log_file, "LOGPULSE_GENERAL_LOG_FILE");

        // Analysis
        override_string(
            &mut self.analysis.source_path,
            "LOGPULSE_ANALYSIS_SOURCE_PATH",
        );
        override_string(&mut self.analysis.delimiter, "LOGPULSE_ANALYSIS_DELIMITER");
        override_bool(&mut self.analysis.has_header, "LOGPULSE_ANALYSIS_HAS_HEADER");
        override_string(
            &mut self.analysis.column_mode,
            "LOGPULSE_ANALYSIS_COLUMN_MODE",
        );
        override_usize(
            &mut self.analysis.top_ip_limit,
            "LOGPULSE_ANALYSIS_TOP_IP_LIMIT",
        );
        override_usize(
            &mut self.analysis.recent_errors_limit,
            "LOGPULSE_ANALYSIS_RECENT_ERRORS_LIMIT",
        );
        override_bool(
            &mut self.analysis.include_4xx,
            "LOGPULSE_ANALYSIS_INCLUDE_4XX",
        );
        override_bool(
            &mut self.analysis.include_5xx,
            "LOGPULSE_ANALYSIS_INCLUDE_5XX",
        );

        // Health
        override_f64(&mut self.health.warning_rate, "LOGPULSE_HEALTH_WARNING_RATE");
        override_f64(
            &mut self.health.critical_rate,
            "LOGPULSE_HEALTH_CRITICAL_RATE",
        );

        // Report
        override_string(&mut self.report.output_dir, "LOGPULSE_REPORT_OUTPUT_DIR");
        override_string(
            &mut self.report.summary_file,
            "LOGPULSE_REPORT_SUMMARY_FILE",
        );
        override_usize(&mut self.report.chart_width, "LOGPULSE_REPORT_CHART_WIDTH");

        // Dashboard
        override_string(&mut self.dashboard.username, "LOGPULSE_DASHBOARD_USERNAME");
        override_string(&mut self.dashboard.password, "LOGPULSE_DASHBOARD_PASSWORD");
        override_u64(
            &mut self.dashboard.tick_rate_ms,
            "LOGPULSE_DASHBOARD_TICK_RATE_MS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPulseError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.analysis.source_path.is_empty() {
            return Err(invalid(
                "analysis.source_path",
                "source path must not be empty".to_owned(),
            ));
        }

        if self.analysis.delimiter.chars().count() != 1 {
            return Err(invalid(
                "analysis.delimiter",
                "delimiter must be exactly one character".to_owned(),
            ));
        }

        let valid_modes = ["positional", "header"];
        if !valid_modes.contains(&self.analysis.column_mode.as_str()) {
            return Err(invalid(
                "analysis.column_mode",
                format!("must be one of: {}", valid_modes.join(", ")),
            ));
        }

        // 헤더 모드는 헤더 행이 있어야 컬럼 위치를 알 수 있음
        if self.analysis.column_mode == "header" && !self.analysis.has_header {
            return Err(invalid(
                "analysis.has_header",
                "header column mode requires has_header = true".to_owned(),
            ));
        }

        if self.analysis.top_ip_limit == 0 {
            return Err(invalid(
                "analysis.top_ip_limit",
                "must be greater than 0".to_owned(),
            ));
        }

        let health = &self.health;
        if !(health.warning_rate.is_finite() && health.critical_rate.is_finite())
            || health.warning_rate < 0.0
            || health.warning_rate >= health.critical_rate
        {
            return Err(invalid(
                "health.warning_rate",
                format!(
                    "must satisfy 0 <= warning_rate < critical_rate (got {} / {})",
                    health.warning_rate, health.critical_rate
                ),
            ));
        }

        if self.report.summary_file.is_empty() {
            return Err(invalid(
                "report.summary_file",
                "summary file name must not be empty".to_owned(),
            ));
        }

        if self.report.chart_width < 10 {
            return Err(invalid(
                "report.chart_width",
                "must be at least 10 columns".to_owned(),
            ));
        }

        if self.dashboard.tick_rate_ms == 0 {
            return Err(invalid(
                "dashboard.tick_rate_ms",
                "must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> LogPulseError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
    /// 진단 로그 파일 경로 (빈 문자열이면 stderr)
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
            log_file: "execution.log".to_owned(),
        }
    }
}

/// 분석 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 기본 입력 파일 경로
    pub source_path: String,
    /// 필드 구분자 (한 글자)
    pub delimiter: String,
    /// 첫 줄이 헤더인지 여부
    pub has_header: bool,
    /// 컬럼 해석 방식 (positional, header)
    pub column_mode: String,
    /// 에러 IP 순위 최대 개수
    pub top_ip_limit: usize,
    /// 최근 에러 이벤트 최대 개수
    pub recent_errors_limit: usize,
    /// 4xx 에러 포함 여부
    pub include_4xx: bool,
    /// 5xx 에러 포함 여부
    pub include_5xx: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_path: "logs/server_logs.csv".to_owned(),
            delimiter: ",".to_owned(),
            has_header: true,
            column_mode: "positional".to_owned(),
            top_ip_limit: 5,
            recent_errors_limit: 10,
            include_4xx: true,
            include_5xx: true,
        }
    }
}

/// 상태 분류 기준 (에러율, 퍼센트)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// 이 값 이상이면 Warning
    pub warning_rate: f64,
    /// 이 값 이상이면 Critical
    pub critical_rate: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            warning_rate: 10.0,
            critical_rate: 30.0,
        }
    }
}

/// 리포트 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 리포트/차트 출력 디렉토리
    pub output_dir: String,
    /// 텍스트 리포트 파일명
    pub summary_file: String,
    /// 터미널 막대 차트 최대 폭 (문자 수)
    pub chart_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "output".to_owned(),
            summary_file: "summary_report.txt".to_owned(),
            chart_width: 40,
        }
    }
}

/// 대시보드 설정
///
/// 자격 증명은 로그인 게이트용 자리표시자입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 로그인 사용자명
    pub username: String,
    /// 로그인 비밀번호
    pub password: String,
    /// 화면 갱신 주기 (밀리초)
    pub tick_rate_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_owned(),
            password: "admin123".to_owned(),
            tick_rate_ms: 250,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}
