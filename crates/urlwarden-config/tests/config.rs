// urlwarden-config/tests/config.rs
// ============================================================================
// Module: Configuration Tests
// Description: Tests for TOML loading, defaults, and fail-closed validation.
// ============================================================================
//! ## Overview
//! Exercises configuration loading against files on disk and validation of
//! out-of-range values.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Tests unwrap on temporary files created by the test itself."
)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use urlwarden_config::AuditSinkKind;
use urlwarden_config::ConfigError;
use urlwarden_config::StoreBackend;
use urlwarden_config::UrlwardenConfig;

/// Writes `content` to a fresh config file and returns its path.
fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("urlwarden.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// SECTION: Loading and Defaults
// ============================================================================

#[test]
fn test_empty_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");
    let config = UrlwardenConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:8080");
    assert_eq!(config.stores.backend, StoreBackend::Memory);
    assert_eq!(config.audit.sink, AuditSinkKind::Stderr);
    assert!(config.pipeline.check_signatures);
    assert!(config.pipeline.check_reputation);
}

#[test]
fn test_sections_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
bind = "0.0.0.0:9000"

[pipeline]
allowed_schemes = ["https"]
min_port = 1024
max_port = 2048
max_url_length = 512
check_reputation = false
"#,
    );
    let config = UrlwardenConfig::load(Some(&path)).unwrap();
    assert_eq!(config.server.bind, "0.0.0.0:9000");
    let pipeline = config.pipeline_config();
    assert_eq!(pipeline.allowed_schemes, vec!["https".to_string()]);
    assert_eq!(pipeline.min_port, 1024);
    assert_eq!(pipeline.max_port, 2048);
    assert_eq!(pipeline.max_url_length, 512);
    assert!(!pipeline.check_reputation);
    assert!(pipeline.check_signatures);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[server\nbind = ");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn test_invalid_bind_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[server]\nbind = \"not-an-address\"\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_empty_scheme_list_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[pipeline]\nallowed_schemes = []\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_uppercase_scheme_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[pipeline]\nallowed_schemes = [\"HTTP\"]\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_inverted_port_range_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[pipeline]\nmin_port = 2000\nmax_port = 1000\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_min_port_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[pipeline]\nmin_port = 0\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_sqlite_backend_requires_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[stores]\nbackend = \"sqlite\"\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_file_audit_sink_requires_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[audit]\nsink = \"file\"\n");
    let result = UrlwardenConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_sqlite_backend_with_path_accepted() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("warden.db");
    let content = format!("[stores]\nbackend = \"sqlite\"\npath = {:?}\n", db_path);
    let path = write_config(&dir, &content);
    let config = UrlwardenConfig::load(Some(&path)).unwrap();
    assert_eq!(config.stores.backend, StoreBackend::Sqlite);
    assert_eq!(config.stores.path, Some(db_path));
}
