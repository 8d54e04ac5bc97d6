/// Tests for main.rs initialization logic
/// These tests verify configuration and initialization behavior
use std::path::PathBuf;
use std::sync::Arc;

use garmin_bridge_client::HealthDataSource;
use garmin_bridge_client::config::Config;
use garmin_bridge_client::http_client::ReqwestBridgeClient;
use garmin_daily_notes::{LoggingSource, SampleSource, SyncConfig};

#[test]
fn test_log_env_priority() {
    // GARMIN_NOTES_LOG_LEVEL wins over RUST_LOG, then `info`
    let result = std::env::var("GARMIN_NOTES_LOG_LEVEL_TEST_NONEXISTENT")
        .or_else(|_| std::env::var("RUST_LOG_TEST_NONEXISTENT"))
        .unwrap_or_else(|_| "info".to_string());
    assert_eq!(result, "info");
}

#[test]
fn test_env_filter_creation() {
    let env_filter = tracing_subscriber::EnvFilter::try_new("garmin_daily_notes=debug,info");
    assert!(env_filter.is_ok());
}

#[test]
fn test_env_filter_fallback() {
    let env_filter = tracing_subscriber::EnvFilter::try_new("invalid[[[filter")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    assert!(!format!("{:?}", env_filter).is_empty());
}

#[test]
fn test_bridge_config_defaults() {
    let config = Config::from_env_with(|_| None).expect("config");
    assert_eq!(config.base_url, "http://localhost:3001");
    assert!(config.credentials.is_none());
    assert_eq!(config.session_ttl_secs, 3600);
}

#[test]
fn test_sync_config_from_cli_values() {
    let cfg = SyncConfig::from_env_with(|_| None, Some(PathBuf::from("/notes")), Some(0))
        .expect("config");
    assert_eq!(cfg.vault_root, PathBuf::from("/notes"));
    assert!(cfg.cooldown.is_zero());
}

#[tokio::test]
async fn test_client_initialization() {
    let client = ReqwestBridgeClient::new("http://127.0.0.1:3001/");
    assert_eq!(client.base_url(), "http://127.0.0.1:3001");
    assert!(!client.session_expired().await);
}

#[tokio::test]
async fn test_sample_source_initialization() {
    let source: Arc<dyn HealthDataSource> = Arc::new(LoggingSource::new(SampleSource));
    let status = source.check_connection().await.expect("status");
    assert!(status.is_ok());
}
