//! Integration tests for `logpulse config` and the configuration the
//! commands run with.
//!
//! Tests config loading and validation with real TOML files.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use logpulse_analyzer::{Analyzer, LogSource, StaticCredentials};
use logpulse_core::config::LogPulseConfig;
use logpulse_core::pipeline::CredentialVerifier;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("logpulse.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[analysis]
source_path = "server_logs.csv"
top_ip_limit = 5

[health]
warning_rate = 10.0
critical_rate = 30.0
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let result = LogPulseConfig::load(&config_path).await;

    // Then: Should succeed
    assert!(result.is_ok(), "valid config should load successfully");
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write bad config");

    let result = LogPulseConfig::load(&config_path).await;
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("nonexistent.toml");

    // strict load reports the missing file
    let result = LogPulseConfig::load(&config_path).await;
    assert!(result.is_err(), "missing file should fail strict load");

    // other commands fall back to defaults
    let config = LogPulseConfig::load_or_default(&config_path)
        .await
        .expect("missing file falls back to defaults");
    assert_eq!(config.analysis.source_path, "logs/server_logs.csv");
}

#[tokio::test]
async fn test_config_validate_empty_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").expect("should write empty config");

    let config = LogPulseConfig::load(&config_path)
        .await
        .expect("empty config uses defaults");
    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.health.warning_rate, 10.0);
    assert_eq!(config.health.critical_rate, 30.0);
}

#[tokio::test]
async fn test_config_rejects_inverted_thresholds() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("thresholds.toml");
    fs::write(
        &config_path,
        "[health]\nwarning_rate = 40.0\ncritical_rate = 30.0\n",
    )
    .expect("should write config");

    let err = LogPulseConfig::load(&config_path)
        .await
        .expect_err("warning above critical is invalid");
    assert!(err.to_string().contains("health.warning_rate"));
}

#[tokio::test]
async fn test_config_rejects_header_mode_without_header() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("header.toml");
    fs::write(
        &config_path,
        "[analysis]\ncolumn_mode = \"header\"\nhas_header = false\n",
    )
    .expect("should write config");

    assert!(LogPulseConfig::load(&config_path).await.is_err());
}

#[tokio::test]
async fn test_config_unicode_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("unicode.toml");
    fs::write(
        &config_path,
        "[analysis]\nsource_path = \"로그/서버.csv\"\n\n[dashboard]\nusername = \"관리자\"\n",
    )
    .expect("should write config");

    let config = LogPulseConfig::load(&config_path)
        .await
        .expect("unicode values are valid");
    assert_eq!(config.analysis.source_path, "로그/서버.csv");
    assert_eq!(config.dashboard.username, "관리자");
}

#[tokio::test]
async fn test_config_drives_analysis() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("logpulse.toml");
    fs::write(
        &config_path,
        "[analysis]\ntop_ip_limit = 1\ninclude_4xx = false\n\n[health]\nwarning_rate = 1.0\ncritical_rate = 50.0\n",
    )
    .expect("should write config");

    let config = LogPulseConfig::load(&config_path)
        .await
        .expect("config should load");
    let analyzer =
        Analyzer::from_config(&config.analysis, &config.health).expect("analyzer from config");

    let text = "timestamp,ip,request,error_code\n\
                t1,1.1.1.1,GET,404\n\
                t2,2.2.2.2,GET,500\n\
                t3,2.2.2.2,GET,200\n\
                t4,3.3.3.3,GET,200\n";
    let analysis = analyzer
        .run(&LogSource::from_text("inline", text))
        .expect("analysis");

    assert_eq!(analysis.stats.top_ips.len(), 1);
    assert_eq!(analysis.stats.error_counts.get(&404), None);
    assert_eq!(analysis.stats.error_counts.get(&500), Some(1));
    // 2 errors in 4 requests: 50% sits on the critical boundary
    assert_eq!(analysis.health.status.to_string(), "Critical");
}

#[tokio::test]
async fn test_dashboard_credentials_from_config() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("logpulse.toml");
    fs::write(
        &config_path,
        "[dashboard]\nusername = \"ops\"\npassword = \"s3cret\"\n",
    )
    .expect("should write config");

    let config = LogPulseConfig::load(&config_path)
        .await
        .expect("config should load");
    let verifier = StaticCredentials::from_config(&config.dashboard);
    assert!(verifier.verify("ops", "s3cret"));
    assert!(!verifier.verify("admin", "admin123"));
}

#[tokio::test]
#[serial]
async fn test_env_override_applies_after_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("logpulse.toml");
    fs::write(&config_path, "[report]\noutput_dir = \"from-file\"\n").expect("should write");

    // SAFETY: serial test; no other test touches this variable concurrently.
    unsafe { std::env::set_var("LOGPULSE_REPORT_OUTPUT_DIR", "from-env") };
    let result = LogPulseConfig::load(&config_path).await;
    unsafe { std::env::remove_var("LOGPULSE_REPORT_OUTPUT_DIR") };

    let config = result.expect("config should load");
    assert_eq!(config.report.output_dir, "from-env");
}
