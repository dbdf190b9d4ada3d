// urlwarden-core/tests/validate.rs
// ============================================================================
// Module: Format Validator Tests
// Description: Tests for the scheme/host/port/length grammar.
// ============================================================================
//! ## Overview
//! Validates acceptance and rejection across the configured grammar.

use urlwarden_core::PipelineConfig;
use urlwarden_core::runtime::validate::FormatViolation;
use urlwarden_core::runtime::validate::validate_url;

/// Returns the default pipeline configuration.
fn config() -> PipelineConfig {
    PipelineConfig::default()
}

// ============================================================================
// SECTION: Accepted URLs
// ============================================================================

#[test]
fn test_valid_http_url() {
    assert_eq!(validate_url("http://example.com", &config()), Ok(()));
}

#[test]
fn test_valid_https_url() {
    assert_eq!(validate_url("https://example.com", &config()), Ok(()));
}

#[test]
fn test_valid_url_with_port() {
    assert_eq!(validate_url("http://example.com:8080", &config()), Ok(()));
}

#[test]
fn test_valid_url_with_path_and_query() {
    assert_eq!(validate_url("http://example.com/a/b?q=1", &config()), Ok(()));
}

#[test]
fn test_valid_subdomain_and_hyphens() {
    assert_eq!(validate_url("http://sub-1.example-site.com/x", &config()), Ok(()));
}

#[test]
fn test_port_boundaries_accepted() {
    assert_eq!(validate_url("http://example.com:1", &config()), Ok(()));
    assert_eq!(validate_url("http://example.com:65535", &config()), Ok(()));
}

// ============================================================================
// SECTION: Rejected URLs
// ============================================================================

#[test]
fn test_unsupported_scheme_rejected() {
    assert_eq!(
        validate_url("ftp://example.com", &config()),
        Err(FormatViolation::UnsupportedScheme)
    );
}

#[test]
fn test_missing_hostname_rejected() {
    assert_eq!(validate_url("http:///path", &config()), Err(FormatViolation::EmptyHostname));
}

#[test]
fn test_label_with_space_rejected() {
    assert_eq!(
        validate_url("http://exa mple.com", &config()),
        Err(FormatViolation::InvalidHostname)
    );
}

#[test]
fn test_label_with_leading_hyphen_rejected() {
    assert_eq!(
        validate_url("http://-bad.example.com", &config()),
        Err(FormatViolation::InvalidHostname)
    );
}

#[test]
fn test_label_longer_than_63_rejected() {
    let label = "a".repeat(64);
    let url = format!("http://{label}.com");
    assert_eq!(validate_url(&url, &config()), Err(FormatViolation::InvalidHostname));
}

#[test]
fn test_port_out_of_range_rejected() {
    assert_eq!(
        validate_url("http://example.com:99999", &config()),
        Err(FormatViolation::PortOutOfRange)
    );
    assert_eq!(
        validate_url("http://example.com:0", &config()),
        Err(FormatViolation::PortOutOfRange)
    );
}

#[test]
fn test_non_numeric_port_rejected() {
    assert_eq!(
        validate_url("http://example.com:http", &config()),
        Err(FormatViolation::InvalidPort)
    );
}

#[test]
fn test_url_over_maximum_length_rejected() {
    let path = "a".repeat(4096);
    let url = format!("http://example.com/{path}");
    assert_eq!(validate_url(&url, &config()), Err(FormatViolation::TooLong));
}

#[test]
fn test_schemeless_string_unparseable() {
    assert_eq!(validate_url("example.com/path", &config()), Err(FormatViolation::Unparseable));
}

// ============================================================================
// SECTION: Configured Ranges
// ============================================================================

#[test]
fn test_narrowed_port_range_enforced() {
    let config = PipelineConfig {
        min_port: 1024,
        max_port: 2048,
        ..PipelineConfig::default()
    };
    assert_eq!(validate_url("http://example.com:1024", &config), Ok(()));
    assert_eq!(
        validate_url("http://example.com:80", &config),
        Err(FormatViolation::PortOutOfRange)
    );
}

#[test]
fn test_custom_scheme_allow_list() {
    let config = PipelineConfig {
        allowed_schemes: vec!["https".to_string()],
        ..PipelineConfig::default()
    };
    assert_eq!(
        validate_url("http://example.com", &config),
        Err(FormatViolation::UnsupportedScheme)
    );
    assert_eq!(validate_url("https://example.com", &config), Ok(()));
}
