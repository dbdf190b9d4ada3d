// urlwarden-core/tests/reconstruct.rs
// ============================================================================
// Module: URL Reconstructor Tests
// Description: Tests for fragment-to-URL reconstruction.
// ============================================================================
//! ## Overview
//! Validates scheme defaulting, fragment splitting, and query appending.

use urlwarden_core::runtime::reconstruct::ReconstructError;
use urlwarden_core::runtime::reconstruct::reconstruct_url;

// ============================================================================
// SECTION: Scheme Handling
// ============================================================================

#[test]
fn test_fragment_without_scheme_defaults_to_http() {
    let url = reconstruct_url("example.com/path", None);
    assert_eq!(url, Ok("http://example.com/path".to_string()));
}

#[test]
fn test_fragment_with_http_scheme_used_verbatim() {
    let url = reconstruct_url("http://example.com/path", None);
    assert_eq!(url, Ok("http://example.com/path".to_string()));
}

#[test]
fn test_fragment_with_https_scheme_used_verbatim() {
    let url = reconstruct_url("https://example.com/path", None);
    assert_eq!(url, Ok("https://example.com/path".to_string()));
}

// ============================================================================
// SECTION: Fragment Splitting
// ============================================================================

#[test]
fn test_hostname_only_fragment() {
    let url = reconstruct_url("example.com", None);
    assert_eq!(url, Ok("http://example.com".to_string()));
}

#[test]
fn test_hostname_with_trailing_slash_drops_empty_remainder() {
    let url = reconstruct_url("example.com/", None);
    assert_eq!(url, Ok("http://example.com".to_string()));
}

#[test]
fn test_hostname_with_port_and_path() {
    let url = reconstruct_url("example.com:8080/api/v1/users", None);
    assert_eq!(url, Ok("http://example.com:8080/api/v1/users".to_string()));
}

#[test]
fn test_empty_fragment_is_malformed() {
    assert_eq!(reconstruct_url("", None), Err(ReconstructError::EmptyFragment));
}

// ============================================================================
// SECTION: Query Appending
// ============================================================================

#[test]
fn test_query_string_appended_with_separator() {
    let url = reconstruct_url("example.com/search", Some("q=test"));
    assert_eq!(url, Ok("http://example.com/search?q=test".to_string()));
}

#[test]
fn test_empty_query_string_not_appended() {
    let url = reconstruct_url("example.com/search", Some(""));
    assert_eq!(url, Ok("http://example.com/search".to_string()));
}

#[test]
fn test_query_appended_to_embedded_scheme_fragment() {
    let url = reconstruct_url("https://example.com/search", Some("q=test"));
    assert_eq!(url, Ok("https://example.com/search?q=test".to_string()));
}
